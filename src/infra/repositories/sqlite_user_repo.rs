use crate::domain::{models::user::{Role, User}, ports::UserRepository};
use crate::domain::services::visibility::Scope;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::error;

const USER_COLUMNS: &str = "id, name, username, password_hash, role, avatar_initials, created_at";

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepo {
    async fn create(&self, user: &User) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "INSERT INTO users ({USER_COLUMNS}) VALUES (?, ?, ?, ?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        ))
            .bind(&user.id)
            .bind(&user.name)
            .bind(&user.username)
            .bind(&user.password_hash)
            .bind(user.role.as_str())
            .bind(&user.avatar_initials)
            .bind(user.created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::conflict(e, "Username already exists"))
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE username = ?"))
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn list(&self, scope: &Scope) -> Result<Vec<User>, AppError> {
        let (sql, caller_id) = match scope {
            Scope::All => (format!("SELECT {USER_COLUMNS} FROM users ORDER BY name"), None),
            Scope::Subordinates(caller_id) => (
                format!("SELECT {USER_COLUMNS} FROM users WHERE role = 'user' OR id = ? ORDER BY name"),
                Some(caller_id),
            ),
            Scope::OnlySelf(caller_id) => (format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?"), Some(caller_id)),
            _ => return Err(AppError::Forbidden("Insufficient permissions".into())),
        };

        let mut query = sqlx::query_as::<_, User>(&sql);
        if let Some(caller_id) = caller_id {
            query = query.bind(caller_id);
        }
        query.fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_profile(&self, id: &str, name: &str, role: Role) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET name = ?, role = ?, avatar_initials = ? WHERE id = ? RETURNING {USER_COLUMNS}"
        ))
            .bind(name)
            .bind(role.as_str())
            .bind(crate::domain::models::user::avatar_initials(name))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("User not found".into()))
    }

    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE users SET password_hash = ? WHERE id = ?")
            .bind(password_hash)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("SQLite User Deletion Failed: {:?}", e);
                AppError::Database(e)
            })?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("User not found".into()));
        }
        Ok(())
    }
}
