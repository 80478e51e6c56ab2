use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{info, warn};
use crate::api::dtos::{
    requests::{CreateWorkUnitRequest, UpdateWorkUnitRequest, WorkUnitUsersRequest},
    responses::MessageResponse,
};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::assignment::Relation;
use crate::domain::models::user::{Role, User};
use crate::domain::models::work_unit::{NewWorkUnit, WorkUnitUpdate, WorkUnitView};
use crate::domain::services::validation::{optional_non_empty, require_non_empty};
use crate::domain::services::visibility::{resolve, Resource};
use crate::error::AppError;
use crate::state::AppState;

fn not_found() -> AppError {
    AppError::NotFound("Work unit not found".into())
}

async fn ensure_exists(state: &AppState, unit_id: &str) -> Result<WorkUnitView, AppError> {
    state.work_unit_repo.find_by_id(unit_id).await?.ok_or_else(not_found)
}

async fn ensure_manages(state: &AppState, caller: &User, unit_id: &str) -> Result<(), AppError> {
    if caller.role == Role::Admin || state.work_unit_repo.is_manager(unit_id, &caller.id).await? {
        return Ok(());
    }
    warn!(user_id = %caller.id, work_unit_id = %unit_id, "Work unit access denied");
    Err(AppError::Forbidden("Access denied".into()))
}

pub async fn list_work_units(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve(&caller, Resource::WorkUnits).require_visible()?;
    let units = state.work_unit_repo.list(&scope).await?;
    Ok(Json(units))
}

pub async fn get_work_unit(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve(&caller, Resource::WorkUnits).require_visible()?;
    let unit = ensure_exists(&state, &unit_id).await?;

    if !scope.permits_work_unit(unit.managers.iter().map(|m| m.id.as_str())) {
        return Err(AppError::Forbidden("Access denied".into()));
    }
    Ok(Json(unit))
}

pub async fn create_work_unit(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateWorkUnitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = require_non_empty(payload.name.as_deref(), "name")?;
    let manager_ids = payload.manager_ids.unwrap_or_default();
    if manager_ids.is_empty() {
        return Err(AppError::Validation("At least one manager is required".into()));
    }

    let created = state
        .work_unit_repo
        .create(&NewWorkUnit::new(name, payload.description, manager_ids))
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_work_unit(
    State(state): State<Arc<AppState>>,
    Path(unit_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateWorkUnitRequest>,
) -> Result<impl IntoResponse, AppError> {
    let update = WorkUnitUpdate {
        name: optional_non_empty(payload.name.as_deref(), "name")?,
        description: payload.description,
        is_disabled: payload.is_disabled,
        manager_ids: payload.manager_ids,
    };
    let updated = state.work_unit_repo.update(&unit_id, &update).await?;
    Ok(Json(updated))
}

pub async fn delete_work_unit(
    State(state): State<Arc<AppState>>,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.work_unit_repo.delete(&unit_id).await?;
    info!("Deleted work unit: {}", unit_id);
    Ok(Json(MessageResponse::new("Work unit deleted")))
}

pub async fn list_work_unit_users(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(unit_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    // Managers are checked first so unknown ids look the same as units they don't manage.
    ensure_manages(&state, &caller, &unit_id).await?;
    ensure_exists(&state, &unit_id).await?;

    let user_ids = state.assignment_repo.list_members(Relation::WorkUnitMembers, &unit_id).await?;
    Ok(Json(user_ids))
}

pub async fn update_work_unit_users(
    State(state): State<Arc<AppState>>,
    Path(unit_id): Path<String>,
    ApiJson(payload): ApiJson<WorkUnitUsersRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_ids = payload
        .user_ids
        .ok_or_else(|| AppError::Validation("userIds must be an array".into()))?;
    ensure_exists(&state, &unit_id).await?;

    state
        .assignment_repo
        .replace_members(Relation::WorkUnitMembers, &unit_id, &user_ids)
        .await?;
    Ok(Json(MessageResponse::new("Work unit users updated")))
}
