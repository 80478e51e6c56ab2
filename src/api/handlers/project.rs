use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::{requests::CreateProjectRequest, responses::MessageResponse};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::project::Project;
use crate::domain::services::validation::{optional_non_empty, require_non_empty};
use crate::domain::services::visibility::{resolve, Resource};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_projects(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve(&caller, Resource::Projects).require_visible()?;
    let projects = state.project_repo.list(&scope).await?;
    Ok(Json(projects))
}

pub async fn create_project(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateProjectRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = require_non_empty(payload.name.as_deref(), "name")?;
    let client_id = require_non_empty(payload.client_id.as_deref(), "clientId")?;
    let color = optional_non_empty(payload.color.as_deref(), "color")?;

    let project = Project::new(name, client_id, color, payload.description);
    let created = state.project_repo.create(&project).await?;
    info!(project_id = %created.id, client_id = %created.client_id, "Created project");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_project(
    State(state): State<Arc<AppState>>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.project_repo.delete(&project_id).await?;
    info!("Deleted project: {}", project_id);
    Ok(Json(MessageResponse::new("Project deleted")))
}
