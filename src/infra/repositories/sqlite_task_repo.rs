use crate::domain::{models::task::{Task, TaskUpdate}, ports::TaskRepository};
use crate::domain::services::visibility::Scope;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

const TASK_COLUMNS: &str =
    "id, name, project_id, description, is_recurring, recurrence_pattern, recurrence_start, recurrence_end, created_at";

pub struct SqliteTaskRepo {
    pool: SqlitePool,
}

impl SqliteTaskRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for SqliteTaskRepo {
    async fn create(&self, task: &Task) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "INSERT INTO tasks ({TASK_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {TASK_COLUMNS}"
        ))
            .bind(&task.id)
            .bind(&task.name)
            .bind(&task.project_id)
            .bind(&task.description)
            .bind(task.is_recurring)
            .bind(&task.recurrence_pattern)
            .bind(task.recurrence_start)
            .bind(task.recurrence_end)
            .bind(task.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::referential(e, "Project not found"))
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<Task>, AppError> {
        match scope {
            Scope::All => sqlx::query_as::<_, Task>(&format!("SELECT {TASK_COLUMNS} FROM tasks ORDER BY name"))
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            Scope::AssignedTo(user_id) => sqlx::query_as::<_, Task>(
                "SELECT t.id, t.name, t.project_id, t.description, t.is_recurring, t.recurrence_pattern,
                        t.recurrence_start, t.recurrence_end, t.created_at
                 FROM tasks t
                 JOIN user_tasks ut ON ut.task_id = t.id
                 WHERE ut.user_id = ?
                 ORDER BY t.name"
            )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            _ => Err(AppError::Forbidden("Insufficient permissions".into())),
        }
    }

    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, AppError> {
        sqlx::query_as::<_, Task>(&format!(
            "UPDATE tasks SET
                name = COALESCE(?, name),
                description = COALESCE(?, description),
                is_recurring = COALESCE(?, is_recurring),
                recurrence_pattern = ?,
                recurrence_start = ?,
                recurrence_end = ?
             WHERE id = ?
             RETURNING {TASK_COLUMNS}"
        ))
            .bind(&update.name)
            .bind(&update.description)
            .bind(update.is_recurring)
            .bind(update.recurrence_pattern.map(|p| p.to_string()))
            .bind(update.recurrence_start)
            .bind(update.recurrence_end)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Task not found".into()))
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM tasks WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Task not found".into()));
        }
        Ok(())
    }

    async fn is_assigned(&self, task_id: &str, user_id: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM user_tasks WHERE task_id = ? AND user_id = ?)"
        )
            .bind(task_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
