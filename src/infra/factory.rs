use std::sync::Arc;
use sqlx::SqlitePool;
use tracing::info;

use crate::config::Config;
use crate::domain::ports::DirectoryService;
use crate::domain::services::auth_service::AuthService;
use crate::error::AppError;
use crate::infra::db;
use crate::infra::directory::ldap_directory_service::LdapDirectoryService;
use crate::infra::repositories::{
    sqlite_assignment_repo::SqliteAssignmentRepo, sqlite_client_repo::SqliteClientRepo,
    sqlite_project_repo::SqliteProjectRepo, sqlite_quote_repo::SqliteQuoteRepo,
    sqlite_sale_repo::SqliteSaleRepo, sqlite_settings_repo::SqliteSettingsRepo,
    sqlite_task_repo::SqliteTaskRepo, sqlite_user_repo::SqliteUserRepo,
    sqlite_work_unit_repo::SqliteWorkUnitRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    info!("Initializing SQLite connection with WAL Mode...");
    let pool = db::connect(&config.database_url).await?;

    db::run_migrations(&pool)
        .await
        .map_err(|e| AppError::InternalWithMsg(format!("Failed to run SQLite migrations: {}", e)))?;

    Ok(build_state(config, pool, Arc::new(LdapDirectoryService::new())))
}

/// Wires every repository onto one pool. The directory is injected so tests can swap it.
pub fn build_state(config: &Config, pool: SqlitePool, directory: Arc<dyn DirectoryService>) -> AppState {
    AppState {
        config: config.clone(),
        user_repo: Arc::new(SqliteUserRepo::new(pool.clone())),
        client_repo: Arc::new(SqliteClientRepo::new(pool.clone())),
        project_repo: Arc::new(SqliteProjectRepo::new(pool.clone())),
        task_repo: Arc::new(SqliteTaskRepo::new(pool.clone())),
        assignment_repo: Arc::new(SqliteAssignmentRepo::new(pool.clone())),
        work_unit_repo: Arc::new(SqliteWorkUnitRepo::new(pool.clone())),
        quote_repo: Arc::new(SqliteQuoteRepo::new(pool.clone())),
        sale_repo: Arc::new(SqliteSaleRepo::new(pool.clone())),
        settings_repo: Arc::new(SqliteSettingsRepo::new(pool)),
        directory,
        auth_service: Arc::new(AuthService::new(config)),
    }
}
