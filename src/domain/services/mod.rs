pub mod auth_service;
pub mod ldap_sync;
pub mod validation;
pub mod visibility;
