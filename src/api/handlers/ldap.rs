use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::responses::SyncResponse;
use crate::api::extractors::json::ApiJson;
use crate::domain::models::ldap::LdapConfigUpdate;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_config(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let config = state.settings_repo.load_ldap_config().await?;
    Ok(Json(config))
}

pub async fn update_config(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LdapConfigUpdate>,
) -> Result<impl IntoResponse, AppError> {
    let config = state.settings_repo.update_ldap_config(&payload).await?;
    info!(enabled = config.enabled, server_url = %config.server_url, "LDAP config updated");
    Ok(Json(config))
}

pub async fn sync(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    // Always sync against freshly loaded config.
    let config = state.settings_repo.load_ldap_config().await?;
    let stats = state.ldap_sync().sync_users(&config).await?;
    Ok(Json(SyncResponse { success: true, stats }))
}
