use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::{requests::ChangePasswordRequest, responses::MessageResponse};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::settings::SettingsUpdate;
use crate::domain::services::auth_service::{hash_password, verify_password};
use crate::domain::services::validation::optional_non_empty;
use crate::error::AppError;
use crate::state::AppState;

const LANGUAGES: [&str; 2] = ["en", "it"];
const WEEK_STARTS: [&str; 2] = ["Monday", "Sunday"];

fn validate_update(update: &SettingsUpdate) -> Result<(), AppError> {
    optional_non_empty(update.full_name.as_deref(), "fullName")?;
    optional_non_empty(update.email.as_deref(), "email")?;

    if let Some(goal) = update.daily_goal {
        if !goal.is_finite() || goal < 0.0 {
            return Err(AppError::Validation("dailyGoal must be 0 or greater".into()));
        }
    }
    if let Some(language) = update.language.as_deref() {
        if !LANGUAGES.contains(&language) {
            return Err(AppError::Validation("language must be one of: en, it".into()));
        }
    }
    if let Some(start) = update.start_of_week.as_deref() {
        if !WEEK_STARTS.contains(&start) {
            return Err(AppError::Validation("startOfWeek must be Monday or Sunday".into()));
        }
    }
    Ok(())
}

pub async fn get_settings(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let settings = state.settings_repo.get_or_create_user_settings(&caller).await?;
    Ok(Json(settings))
}

pub async fn update_settings(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    ApiJson(payload): ApiJson<SettingsUpdate>,
) -> Result<impl IntoResponse, AppError> {
    validate_update(&payload)?;
    let settings = state.settings_repo.upsert_user_settings(&caller, &payload).await?;
    Ok(Json(settings))
}

pub async fn change_password(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    ApiJson(payload): ApiJson<ChangePasswordRequest>,
) -> Result<impl IntoResponse, AppError> {
    let (Some(current), Some(new)) = (
        payload.current_password.filter(|p| !p.is_empty()),
        payload.new_password.filter(|p| !p.is_empty()),
    ) else {
        return Err(AppError::Validation("Current and new passwords are required".into()));
    };

    if !verify_password(&current, &caller.password_hash) {
        return Err(AppError::Validation("Incorrect current password".into()));
    }

    state.user_repo.update_password(&caller.id, &hash_password(&new)?).await?;
    info!(user_id = %caller.id, "Password changed");
    Ok(Json(MessageResponse::new("Password updated successfully")))
}
