use crate::domain::{models::project::Project, ports::ProjectRepository};
use crate::domain::services::visibility::Scope;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteProjectRepo {
    pool: SqlitePool,
}

impl SqliteProjectRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for SqliteProjectRepo {
    async fn create(&self, project: &Project) -> Result<Project, AppError> {
        sqlx::query_as::<_, Project>(
            "INSERT INTO projects (id, name, client_id, color, description, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             RETURNING id, name, client_id, color, description, created_at"
        )
            .bind(&project.id)
            .bind(&project.name)
            .bind(&project.client_id)
            .bind(&project.color)
            .bind(&project.description)
            .bind(project.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::referential(e, "Client not found"))
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<Project>, AppError> {
        match scope {
            Scope::All => sqlx::query_as::<_, Project>(
                "SELECT id, name, client_id, color, description, created_at FROM projects ORDER BY name"
            )
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            Scope::AssignedTo(user_id) => sqlx::query_as::<_, Project>(
                "SELECT p.id, p.name, p.client_id, p.color, p.description, p.created_at FROM projects p
                 JOIN user_projects up ON up.project_id = p.id
                 WHERE up.user_id = ?
                 ORDER BY p.name"
            )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            _ => Err(AppError::Forbidden("Insufficient permissions".into())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Project not found".into()));
        }
        Ok(())
    }
}
