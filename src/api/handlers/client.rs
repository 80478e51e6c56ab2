use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::{requests::CreateClientRequest, responses::MessageResponse};
use crate::api::extractors::{auth::AuthUser, json::ApiJson};
use crate::domain::models::client::Client;
use crate::domain::services::validation::require_non_empty;
use crate::domain::services::visibility::{resolve, Resource};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_clients(
    State(state): State<Arc<AppState>>,
    AuthUser(caller): AuthUser,
) -> Result<impl IntoResponse, AppError> {
    let scope = resolve(&caller, Resource::Clients).require_visible()?;
    let clients = state.client_repo.list(&scope).await?;
    Ok(Json(clients))
}

pub async fn create_client(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<CreateClientRequest>,
) -> Result<impl IntoResponse, AppError> {
    let name = require_non_empty(payload.name.as_deref(), "name")?;
    let created = state.client_repo.create(&Client::new(name)).await?;
    info!("Created client: {}", created.id);
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_client(
    State(state): State<Arc<AppState>>,
    Path(client_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.client_repo.delete(&client_id).await?;
    info!("Deleted client: {}", client_id);
    Ok(Json(MessageResponse::new("Client deleted")))
}
