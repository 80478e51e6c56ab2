pub mod auth;
pub mod client;
pub mod general_settings;
pub mod health;
pub mod ldap;
pub mod project;
pub mod quote;
pub mod sale;
pub mod settings;
pub mod task;
pub mod user;
pub mod work_unit;
