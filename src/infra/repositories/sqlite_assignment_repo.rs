use crate::domain::models::assignment::{AssignmentUpdate, Relation, UserAssignments};
use crate::domain::ports::AssignmentRepository;
use crate::error::AppError;
use crate::infra::db::finish;
use super::junction::{list_set, replace_set};
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::info;

pub struct SqliteAssignmentRepo {
    pool: SqlitePool,
}

impl SqliteAssignmentRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AssignmentRepository for SqliteAssignmentRepo {
    async fn get_user_assignments(&self, user_id: &str) -> Result<UserAssignments, AppError> {
        Ok(UserAssignments {
            client_ids: list_set(&self.pool, Relation::UserClients, user_id).await?,
            project_ids: list_set(&self.pool, Relation::UserProjects, user_id).await?,
            task_ids: list_set(&self.pool, Relation::UserTasks, user_id).await?,
        })
    }

    async fn replace_user_assignments(&self, user_id: &str, update: &AssignmentUpdate) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = async {
            for (relation, ids) in update.replacements() {
                replace_set(&mut *tx, relation, user_id, ids).await?;
            }
            Ok::<_, AppError>(())
        }
        .await;
        finish(tx, outcome).await?;

        info!(user_id, "User assignments replaced");
        Ok(())
    }

    async fn list_members(&self, relation: Relation, owner_id: &str) -> Result<Vec<String>, AppError> {
        list_set(&self.pool, relation, owner_id).await
    }

    async fn replace_members(&self, relation: Relation, owner_id: &str, member_ids: &[String]) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let outcome = replace_set(&mut *tx, relation, owner_id, member_ids).await;
        finish(tx, outcome).await?;

        info!(owner_id, table = relation.table(), count = member_ids.len(), "Junction set replaced");
        Ok(())
    }
}
