use crate::domain::models::assignment::Relation;
use crate::domain::models::work_unit::{NewWorkUnit, WorkUnitUpdate, WorkUnitView};
use crate::domain::ports::WorkUnitRepository;
use crate::domain::services::visibility::Scope;
use crate::error::AppError;
use crate::infra::db::finish;
use super::junction::replace_set;
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Executor, Sqlite, SqlitePool};
use tracing::info;

// Managers and member count come from correlated subqueries so a listing is one statement.
const VIEW_SELECT: &str = "
    SELECT wu.id, wu.name, wu.description, wu.is_disabled,
        (SELECT json_group_array(json_object('id', u.id, 'name', u.name))
           FROM work_unit_managers m
           JOIN users u ON u.id = m.user_id
          WHERE m.work_unit_id = wu.id) AS managers,
        (SELECT COUNT(*) FROM user_work_units uw WHERE uw.work_unit_id = wu.id) AS user_count
    FROM work_units wu";

pub struct SqliteWorkUnitRepo {
    pool: SqlitePool,
}

impl SqliteWorkUnitRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

async fn fetch_view<'e, E>(executor: E, id: &str) -> Result<Option<WorkUnitView>, AppError>
where
    E: Executor<'e, Database = Sqlite>,
{
    sqlx::query_as::<_, WorkUnitView>(&format!("{VIEW_SELECT} WHERE wu.id = ?"))
        .bind(id)
        .fetch_optional(executor)
        .await
        .map_err(AppError::Database)
}

fn require_managers(manager_ids: &[String]) -> Result<(), AppError> {
    if manager_ids.is_empty() {
        return Err(AppError::Validation("At least one manager is required".into()));
    }
    Ok(())
}

#[async_trait]
impl WorkUnitRepository for SqliteWorkUnitRepo {
    async fn create(&self, unit: &NewWorkUnit) -> Result<WorkUnitView, AppError> {
        // Checked before the transaction opens: no header row without a manager.
        require_managers(&unit.manager_ids)?;

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = async {
            sqlx::query("INSERT INTO work_units (id, name, description, is_disabled, created_at) VALUES (?, ?, ?, 0, ?)")
                .bind(&unit.id)
                .bind(&unit.name)
                .bind(&unit.description)
                .bind(Utc::now())
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            replace_set(&mut *tx, Relation::WorkUnitManagers, &unit.id, &unit.manager_ids).await?;

            fetch_view(&mut *tx, &unit.id)
                .await?
                .ok_or(AppError::Internal)
        }
        .await;
        let view = finish(tx, outcome).await?;

        info!(work_unit_id = %view.id, managers = view.managers.len(), "Work unit created");
        Ok(view)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<WorkUnitView>, AppError> {
        fetch_view(&self.pool, id).await
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<WorkUnitView>, AppError> {
        match scope {
            Scope::All => sqlx::query_as::<_, WorkUnitView>(&format!("{VIEW_SELECT} ORDER BY wu.name"))
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            Scope::ManagedBy(user_id) => sqlx::query_as::<_, WorkUnitView>(&format!(
                "{VIEW_SELECT}
                 WHERE EXISTS (
                     SELECT 1 FROM work_unit_managers m WHERE m.work_unit_id = wu.id AND m.user_id = ?
                 )
                 ORDER BY wu.name"
            ))
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            _ => Err(AppError::Forbidden("Insufficient permissions".into())),
        }
    }

    async fn update(&self, id: &str, update: &WorkUnitUpdate) -> Result<WorkUnitView, AppError> {
        if let Some(manager_ids) = &update.manager_ids {
            require_managers(manager_ids)?;
        }

        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = async {
            let result = sqlx::query(
                "UPDATE work_units SET
                    name = COALESCE(?, name),
                    description = COALESCE(?, description),
                    is_disabled = COALESCE(?, is_disabled)
                 WHERE id = ?"
            )
                .bind(&update.name)
                .bind(&update.description)
                .bind(update.is_disabled)
                .bind(id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::Database)?;

            if result.rows_affected() == 0 {
                return Err(AppError::NotFound("Work unit not found".into()));
            }

            if let Some(manager_ids) = &update.manager_ids {
                replace_set(&mut *tx, Relation::WorkUnitManagers, id, manager_ids).await?;
            }

            fetch_view(&mut *tx, id)
                .await?
                .ok_or_else(|| AppError::NotFound("Work unit not found".into()))
        }
        .await;
        let view = finish(tx, outcome).await?;

        info!(work_unit_id = %view.id, "Work unit updated");
        Ok(view)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        // Manager and member rows go with it through ON DELETE CASCADE.
        let result = sqlx::query("DELETE FROM work_units WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Work unit not found".into()));
        }
        Ok(())
    }

    async fn is_manager(&self, unit_id: &str, user_id: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (SELECT 1 FROM work_unit_managers WHERE work_unit_id = ? AND user_id = ?)"
        )
            .bind(unit_id)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
