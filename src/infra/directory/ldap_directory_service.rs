use crate::domain::models::ldap::{DirectoryUser, LdapConfig};
use crate::domain::ports::DirectoryService;
use crate::error::AppError;
use async_trait::async_trait;
use ldap3::{ldap_escape, Ldap, LdapConnAsync, LdapError, Scope, SearchEntry};
use tracing::{debug, error};

const USER_ATTRS: [&str; 4] = ["uid", "cn", "displayName", "sAMAccountName"];

/// Reads users and their group memberships from an LDAP server.
pub struct LdapDirectoryService;

impl LdapDirectoryService {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LdapDirectoryService {
    fn default() -> Self {
        Self::new()
    }
}

fn directory_error(e: LdapError) -> AppError {
    error!("LDAP request failed: {}", e);
    AppError::InternalWithMsg(format!("LDAP request failed: {}", e))
}

fn first_attr(entry: &SearchEntry, names: &[&str]) -> Option<String> {
    names
        .iter()
        .filter_map(|name| entry.attrs.get(*name))
        .flat_map(|values| values.first())
        .find(|value| !value.trim().is_empty())
        .cloned()
}

async fn groups_of(ldap: &mut Ldap, config: &LdapConfig, user_dn: &str) -> Result<Vec<String>, LdapError> {
    let filter = config.group_filter.replace("{0}", &ldap_escape(user_dn));
    let (entries, _) = ldap
        .search(&config.group_base_dn, Scope::Subtree, &filter, vec!["cn"])
        .await?
        .success()?;
    Ok(entries.into_iter().map(|entry| SearchEntry::construct(entry).dn).collect())
}

async fn search_users(ldap: &mut Ldap, config: &LdapConfig) -> Result<Vec<DirectoryUser>, LdapError> {
    ldap.simple_bind(&config.bind_dn, &config.bind_password).await?.success()?;

    let filter = config.user_filter.replace("{0}", "*");
    let (entries, _) = ldap
        .search(&config.base_dn, Scope::Subtree, &filter, USER_ATTRS.to_vec())
        .await?
        .success()?;
    debug!(entries = entries.len(), "LDAP user search returned");

    let mut users = Vec::with_capacity(entries.len());
    for entry in entries {
        let entry = SearchEntry::construct(entry);
        let Some(username) = first_attr(&entry, &["uid", "sAMAccountName"]) else {
            continue;
        };
        let name = first_attr(&entry, &["displayName", "cn"]).unwrap_or_else(|| username.clone());
        let groups = groups_of(ldap, config, &entry.dn).await?;
        users.push(DirectoryUser { username, name, groups });
    }
    Ok(users)
}

#[async_trait]
impl DirectoryService for LdapDirectoryService {
    async fn fetch_users(&self, config: &LdapConfig) -> Result<Vec<DirectoryUser>, AppError> {
        let (conn, mut ldap) = LdapConnAsync::new(&config.server_url).await.map_err(directory_error)?;
        ldap3::drive!(conn);

        let result = search_users(&mut ldap, config).await;
        if let Err(e) = ldap.unbind().await {
            debug!("LDAP unbind failed: {}", e);
        }
        result.map_err(directory_error)
    }
}
