use std::sync::Arc;
use crate::domain::ports::{
    AssignmentRepository, ClientRepository, DirectoryService, ProjectRepository, QuoteRepository,
    SaleRepository, SettingsRepository, TaskRepository, UserRepository, WorkUnitRepository,
};
use crate::domain::services::auth_service::AuthService;
use crate::domain::services::ldap_sync::LdapSyncService;
use crate::config::Config;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub user_repo: Arc<dyn UserRepository>,
    pub client_repo: Arc<dyn ClientRepository>,
    pub project_repo: Arc<dyn ProjectRepository>,
    pub task_repo: Arc<dyn TaskRepository>,
    pub assignment_repo: Arc<dyn AssignmentRepository>,
    pub work_unit_repo: Arc<dyn WorkUnitRepository>,
    pub quote_repo: Arc<dyn QuoteRepository>,
    pub sale_repo: Arc<dyn SaleRepository>,
    pub settings_repo: Arc<dyn SettingsRepository>,
    pub directory: Arc<dyn DirectoryService>,
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    pub fn ldap_sync(&self) -> LdapSyncService {
        LdapSyncService::new(self.user_repo.clone(), self.directory.clone())
    }
}
