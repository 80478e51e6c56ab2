use crate::domain::{models::client::Client, ports::ClientRepository};
use crate::domain::services::visibility::Scope;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteClientRepo {
    pool: SqlitePool,
}

impl SqliteClientRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for SqliteClientRepo {
    async fn create(&self, client: &Client) -> Result<Client, AppError> {
        sqlx::query_as::<_, Client>(
            "INSERT INTO clients (id, name, created_at) VALUES (?, ?, ?) RETURNING id, name, created_at"
        )
            .bind(&client.id)
            .bind(&client.name)
            .bind(client.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<Client>, AppError> {
        match scope {
            Scope::All => sqlx::query_as::<_, Client>("SELECT id, name, created_at FROM clients ORDER BY name")
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            Scope::AssignedTo(user_id) => sqlx::query_as::<_, Client>(
                "SELECT c.id, c.name, c.created_at FROM clients c
                 JOIN user_clients uc ON uc.client_id = c.id
                 WHERE uc.user_id = ?
                 ORDER BY c.name"
            )
                .bind(user_id)
                .fetch_all(&self.pool)
                .await
                .map_err(AppError::Database),
            _ => Err(AppError::Forbidden("Insufficient permissions".into())),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM clients WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Client not found".into()));
        }
        Ok(())
    }
}
