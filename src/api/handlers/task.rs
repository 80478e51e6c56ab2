use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::{info, warn};
use crate::api::dtos::{requests::{CreateTaskRequest, UpdateTaskRequest}, responses::MessageResponse};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::task::{NewTaskParams, RecurrencePattern, Task, TaskUpdate};
use crate::domain::models::user::User;
use crate::domain::services::validation::{optional_non_empty, parse_date, require_non_empty};
use crate::domain::services::visibility::{resolve, Resource, Scope};
use crate::error::AppError;
use crate::state::AppState;

fn parse_pattern(raw: Option<&str>) -> Result<Option<RecurrencePattern>, AppError> {
    raw.map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| {
            p.parse::<RecurrencePattern>()
                .map_err(|e| AppError::Validation(format!("recurrencePattern is invalid: {}", e)))
        })
        .transpose()
}

/// By-id writes follow the listing scope: a plain user may only touch tasks assigned to them.
/// Unassigned and missing ids both answer 403 for them.
async fn ensure_task_in_scope(state: &AppState, caller: &User, task_id: &str) -> Result<(), AppError> {
    let permitted = match resolve(caller, Resource::Tasks).require_visible()? {
        Scope::All => true,
        Scope::AssignedTo(user_id) => state.task_repo.is_assigned(task_id, &user_id).await?,
        _ => false,
    };
    if !permitted {
        warn!(user_id = %caller.id, task_id = %task_id, "Task access denied");
        return Err(AppError::Forbidden("Access denied".into()));
    }
    Ok(())
}

pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve(&caller, Resource::Tasks).require_visible()?;
    let tasks = state.task_repo.list(&scope).await?;
    Ok(Json(tasks))
}

pub async fn create_task(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = require_non_empty(payload.name.as_deref(), "name")?;
    let project_id = require_non_empty(payload.project_id.as_deref(), "projectId")?;

    let task = Task::new(NewTaskParams {
        name,
        project_id,
        description: payload.description,
        is_recurring: payload.is_recurring.unwrap_or(false),
        recurrence_pattern: parse_pattern(payload.recurrence_pattern.as_deref())?,
    });
    let created = state.task_repo.create(&task).await?;
    info!(task_id = %created.id, project_id = %created.project_id, "Created task");
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_task(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(task_id): Path<String>,
    ApiJson(payload): ApiJson<UpdateTaskRequest>,
) -> Result<impl IntoResponse, AppError> {
    ensure_task_in_scope(&state, &caller, &task_id).await?;

    let update = TaskUpdate {
        name: optional_non_empty(payload.name.as_deref(), "name")?,
        description: payload.description,
        is_recurring: payload.is_recurring,
        recurrence_pattern: parse_pattern(payload.recurrence_pattern.as_deref())?,
        recurrence_start: parse_date(payload.recurrence_start.as_deref(), "recurrenceStart")?,
        recurrence_end: parse_date(payload.recurrence_end.as_deref(), "recurrenceEnd")?,
    };
    let updated = state.task_repo.update(&task_id, &update).await?;
    info!("Updated task: {}", updated.id);
    Ok(Json(updated))
}

pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
    Path(task_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    ensure_task_in_scope(&state, &caller, &task_id).await?;

    state.task_repo.delete(&task_id).await?;
    info!("Deleted task: {}", task_id);
    Ok(Json(MessageResponse::new("Task deleted")))
}
