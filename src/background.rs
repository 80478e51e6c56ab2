use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, error, info, info_span, Instrument};
use crate::state::AppState;

/// Periodically mirrors the directory into the user table. The LDAP config is
/// reloaded on every tick so changes made through the API apply without a restart.
pub async fn start_ldap_sync_worker(state: Arc<AppState>) {
    let interval = Duration::from_secs(state.config.ldap_sync_interval_secs.max(1));
    info!(interval_secs = interval.as_secs(), "Starting LDAP sync worker...");

    loop {
        sleep(interval).await;
        run_scheduled_sync(&state)
            .instrument(info_span!("ldap_sync"))
            .await;
    }
}

async fn run_scheduled_sync(state: &AppState) {
    let config = match state.settings_repo.load_ldap_config().await {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load LDAP config: {:?}", e);
            return;
        }
    };

    if !config.enabled {
        debug!("LDAP sync disabled, skipping");
        return;
    }

    match state.ldap_sync().sync_users(&config).await {
        Ok(stats) => info!(synced = stats.synced, created = stats.created, updated = stats.updated, "Scheduled LDAP sync completed"),
        Err(e) => error!("Scheduled LDAP sync failed: {}", e),
    }
}
