pub mod junction;

pub mod sqlite_user_repo;
pub mod sqlite_client_repo;
pub mod sqlite_project_repo;
pub mod sqlite_task_repo;
pub mod sqlite_assignment_repo;
pub mod sqlite_work_unit_repo;
pub mod sqlite_quote_repo;
pub mod sqlite_sale_repo;
pub mod sqlite_settings_repo;
