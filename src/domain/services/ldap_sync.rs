use std::sync::Arc;
use crate::domain::models::{
    ldap::{LdapConfig, RoleMapping, SyncStats},
    user::{Role, User},
};
use crate::domain::ports::{DirectoryService, UserRepository};
use crate::domain::services::auth_service::unusable_password_hash;
use crate::error::AppError;
use tracing::{info, warn};

pub struct LdapSyncService {
    user_repo: Arc<dyn UserRepository>,
    directory: Arc<dyn DirectoryService>,
}

impl LdapSyncService {
    pub fn new(user_repo: Arc<dyn UserRepository>, directory: Arc<dyn DirectoryService>) -> Self {
        Self { user_repo, directory }
    }

    /// Mirrors directory users into the local user table using the supplied,
    /// freshly loaded configuration.
    pub async fn sync_users(&self, config: &LdapConfig) -> Result<SyncStats, AppError> {
        if !config.enabled {
            return Err(AppError::Validation("LDAP sync is disabled".into()));
        }

        let entries = self.directory.fetch_users(config).await?;
        let mut stats = SyncStats::default();

        for entry in entries {
            let username = entry.username.trim();
            if username.is_empty() {
                warn!("Skipping directory entry without a username");
                continue;
            }

            let name = if entry.name.trim().is_empty() { username } else { entry.name.trim() };
            let role = resolve_role(&entry.groups, &config.role_mappings);

            match self.user_repo.find_by_username(username).await? {
                Some(existing) => {
                    if existing.name != name || existing.role != role {
                        self.user_repo.update_profile(&existing.id, name, role).await?;
                        stats.updated += 1;
                    }
                }
                None => {
                    let password_hash = tokio::task::spawn_blocking(unusable_password_hash)
                        .await
                        .map_err(|e| AppError::InternalWithMsg(format!("Password hashing task failed: {}", e)))??;
                    let user = User::new(name.to_string(), username.to_string(), password_hash, role);
                    self.user_repo.create(&user).await?;
                    stats.created += 1;
                }
            }
            stats.synced += 1;
        }

        info!(synced = stats.synced, created = stats.created, updated = stats.updated, "LDAP sync finished");
        Ok(stats)
    }
}

/// Highest-privilege role among mappings matching any of the groups; `user` otherwise.
pub fn resolve_role(groups: &[String], mappings: &[RoleMapping]) -> Role {
    mappings
        .iter()
        .filter(|mapping| groups.iter().any(|group| group_matches(group, &mapping.ldap_group)))
        .map(|mapping| mapping.role)
        .max()
        .unwrap_or(Role::User)
}

/// A mapping names a group either by full DN or by its CN.
fn group_matches(group_dn: &str, mapped: &str) -> bool {
    let mapped = mapped.trim();
    if group_dn.eq_ignore_ascii_case(mapped) {
        return true;
    }
    group_dn
        .split(',')
        .next()
        .and_then(|rdn| rdn.split_once('='))
        .is_some_and(|(attr, value)| attr.trim().eq_ignore_ascii_case("cn") && value.trim().eq_ignore_ascii_case(mapped))
}
