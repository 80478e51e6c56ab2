use crate::domain::models::{
    assignment::{AssignmentUpdate, Relation, UserAssignments},
    client::Client,
    ldap::{DirectoryUser, LdapConfig, LdapConfigUpdate},
    project::Project,
    quote::{Quote, QuoteUpdate},
    sale::{Sale, SaleUpdate},
    settings::{GeneralSettings, SettingsUpdate, UserSettings},
    task::{Task, TaskUpdate},
    user::{Role, User},
    work_unit::{NewWorkUnit, WorkUnitUpdate, WorkUnitView},
};
use crate::domain::services::visibility::Scope;
use crate::error::AppError;
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: &User) -> Result<User, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<User>, AppError>;
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;
    async fn list(&self, scope: &Scope) -> Result<Vec<User>, AppError>;
    async fn update_profile(&self, id: &str, name: &str, role: Role) -> Result<User, AppError>;
    async fn update_password(&self, id: &str, password_hash: &str) -> Result<(), AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ClientRepository: Send + Sync {
    async fn create(&self, client: &Client) -> Result<Client, AppError>;
    async fn list(&self, scope: &Scope) -> Result<Vec<Client>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ProjectRepository: Send + Sync {
    async fn create(&self, project: &Project) -> Result<Project, AppError>;
    async fn list(&self, scope: &Scope) -> Result<Vec<Project>, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn create(&self, task: &Task) -> Result<Task, AppError>;
    async fn list(&self, scope: &Scope) -> Result<Vec<Task>, AppError>;
    async fn update(&self, id: &str, update: &TaskUpdate) -> Result<Task, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn is_assigned(&self, task_id: &str, user_id: &str) -> Result<bool, AppError>;
}

/// Replace-all synchronization of junction sets. Every replace runs in one transaction.
#[async_trait]
pub trait AssignmentRepository: Send + Sync {
    async fn get_user_assignments(&self, user_id: &str) -> Result<UserAssignments, AppError>;
    async fn replace_user_assignments(&self, user_id: &str, update: &AssignmentUpdate) -> Result<(), AppError>;
    async fn list_members(&self, relation: Relation, owner_id: &str) -> Result<Vec<String>, AppError>;
    async fn replace_members(&self, relation: Relation, owner_id: &str, member_ids: &[String]) -> Result<(), AppError>;
}

#[async_trait]
pub trait WorkUnitRepository: Send + Sync {
    async fn create(&self, unit: &NewWorkUnit) -> Result<WorkUnitView, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<WorkUnitView>, AppError>;
    async fn list(&self, scope: &Scope) -> Result<Vec<WorkUnitView>, AppError>;
    async fn update(&self, id: &str, update: &WorkUnitUpdate) -> Result<WorkUnitView, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
    async fn is_manager(&self, unit_id: &str, user_id: &str) -> Result<bool, AppError>;
}

#[async_trait]
pub trait QuoteRepository: Send + Sync {
    async fn create(&self, quote: &Quote) -> Result<Quote, AppError>;
    async fn list(&self) -> Result<Vec<Quote>, AppError>;
    async fn update(&self, id: &str, update: QuoteUpdate) -> Result<Quote, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SaleRepository: Send + Sync {
    async fn create(&self, sale: &Sale) -> Result<Sale, AppError>;
    async fn list(&self) -> Result<Vec<Sale>, AppError>;
    async fn update(&self, id: &str, update: SaleUpdate) -> Result<Sale, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait SettingsRepository: Send + Sync {
    async fn get_or_create_user_settings(&self, user: &User) -> Result<UserSettings, AppError>;
    async fn upsert_user_settings(&self, user: &User, update: &SettingsUpdate) -> Result<UserSettings, AppError>;
    async fn load_general(&self) -> Result<GeneralSettings, AppError>;
    async fn update_general(&self, currency: &str) -> Result<GeneralSettings, AppError>;
    async fn load_ldap_config(&self) -> Result<LdapConfig, AppError>;
    async fn update_ldap_config(&self, update: &LdapConfigUpdate) -> Result<LdapConfig, AppError>;
}

#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn fetch_users(&self, config: &LdapConfig) -> Result<Vec<DirectoryUser>, AppError>;
}
