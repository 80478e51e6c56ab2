pub mod assignment;
pub mod auth;
pub mod client;
pub mod ldap;
pub mod line_item;
pub mod project;
pub mod quote;
pub mod sale;
pub mod settings;
pub mod task;
pub mod user;
pub mod work_unit;
