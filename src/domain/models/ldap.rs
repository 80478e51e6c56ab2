use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use super::user::Role;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoleMapping {
    pub ldap_group: String,
    pub role: Role,
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct LdapConfig {
    pub enabled: bool,
    pub server_url: String,
    pub base_dn: String,
    pub bind_dn: String,
    pub bind_password: String,
    pub user_filter: String,
    pub group_base_dn: String,
    pub group_filter: String,
    #[sqlx(json)]
    pub role_mappings: Vec<RoleMapping>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LdapConfigUpdate {
    pub enabled: Option<bool>,
    pub server_url: Option<String>,
    pub base_dn: Option<String>,
    pub bind_dn: Option<String>,
    pub bind_password: Option<String>,
    pub user_filter: Option<String>,
    pub group_base_dn: Option<String>,
    pub group_filter: Option<String>,
    pub role_mappings: Option<Vec<RoleMapping>>,
}

/// A user entry as returned by the directory.
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryUser {
    pub username: String,
    pub name: String,
    /// Group DNs the user belongs to.
    pub groups: Vec<String>,
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub synced: usize,
    pub created: usize,
    pub updated: usize,
}
