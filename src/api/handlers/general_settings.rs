use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::requests::UpdateGeneralSettingsRequest;
use crate::api::extractors::json::ApiJson;
use crate::domain::services::validation::require_non_empty;
use crate::error::AppError;
use crate::state::AppState;

pub async fn get_general_settings(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings_repo.load_general().await?;
    Ok(Json(settings))
}

pub async fn update_general_settings(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<UpdateGeneralSettingsRequest>,
) -> Result<impl IntoResponse, AppError> {
    let currency = require_non_empty(payload.currency.as_deref(), "currency")?;
    let settings = state.settings_repo.update_general(&currency).await?;
    info!(currency = %settings.currency, "General settings updated");
    Ok(Json(settings))
}
