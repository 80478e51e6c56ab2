use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::{requests::CreateUserRequest, responses::MessageResponse};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::assignment::AssignmentUpdate;
use crate::domain::models::user::{Role, User};
use crate::domain::services::auth_service::hash_password;
use crate::domain::services::validation::require_non_empty;
use crate::domain::services::visibility::{resolve, Resource};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_users(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve(&caller, Resource::Users).require_visible()?;
    let users = state.user_repo.list(&scope).await?;
    Ok(Json(users))
}

pub async fn create_user(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateUserRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = require_non_empty(payload.name.as_deref(), "name")?;
    let username = require_non_empty(payload.username.as_deref(), "username")?;
    let password = payload
        .password
        .filter(|p| !p.is_empty())
        .ok_or_else(|| AppError::Validation("password is required".into()))?;
    let role: Role = require_non_empty(payload.role.as_deref(), "role")?
        .parse()
        .map_err(|_| AppError::Validation("Invalid role".into()))?;

    let user = User::new(name, username, hash_password(&password)?, role);
    let created = state.user_repo.create(&user).await?;

    info!(user_id = %created.id, role = %created.role, "Created user");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if caller.id == user_id {
        return Err(AppError::Validation("Cannot delete your own account".into()));
    }

    state.user_repo.delete(&user_id).await?;
    info!("Deleted user: {}", user_id);
    Ok(Json(MessageResponse::new("User deleted")))
}

pub async fn get_assignments(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    if caller.role == Role::User && caller.id != user_id {
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }

    let assignments = state.assignment_repo.get_user_assignments(&user_id).await?;
    Ok(Json(assignments))
}

pub async fn update_assignments(
    State(state): State<Arc<AppState>>,
    Path(user_id): Path<String>,
    ApiJson(payload): ApiJson<AssignmentUpdate>,
) -> Result<impl IntoResponse, AppError> {
    if state.user_repo.find_by_id(&user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".into()));
    }

    state.assignment_repo.replace_user_assignments(&user_id, &payload).await?;
    Ok(Json(MessageResponse::new("Assignments updated")))
}
