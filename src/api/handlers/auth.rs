use axum::{extract::State, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{info, warn};
use crate::api::dtos::requests::LoginRequest;
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::auth::AuthResponse;
use crate::domain::services::auth_service::verify_password;
use crate::domain::services::validation::require_non_empty;
use crate::error::AppError;
use crate::state::AppState;

pub async fn login(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let username = require_non_empty(payload.username.as_deref(), "username")?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("password is required".into()))?;

    let user = match state.user_repo.find_by_username(&username).await? {
        Some(user) if verify_password(&password, &user.password_hash) => user,
        _ => {
            warn!(username = %username, "Failed login attempt");
            return Err(AppError::Unauthorized("Invalid credentials".into()));
        }
    };

    let token = state.auth_service.issue_token(&user.id)?;
    info!(user_id = %user.id, "User logged in");
    Ok(Json(AuthResponse { token, user }))
}

pub async fn me(AuthUser(user): AuthUser) -> impl IntoResponse {
    Json(user)
}
