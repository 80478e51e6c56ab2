use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::requests::QuoteRequest;
use crate::api::extractors::json::ApiJson;
use crate::domain::models::quote::{NewQuoteParams, Quote, QuoteItem, QuoteUpdate};
use crate::domain::services::validation::{
    optional_non_empty, optional_non_negative_number, parse_date, require_non_empty, validate_line_items,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_quotes(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let quotes = state.quote_repo.list().await?;
    Ok(Json(quotes))
}

pub async fn create_quote(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client_id = require_non_empty(payload.client_id.as_deref(), "clientId")?;
    let client_name = require_non_empty(payload.client_name.as_deref(), "clientName")?;
    let expiration_date = parse_date(payload.expiration_date.as_deref(), "expirationDate")?
        .ok_or_else(|| AppError::Validation("expirationDate is required".into()))?;
    let items = validate_line_items(payload.items.as_deref())?;

    let mut quote = Quote::new(NewQuoteParams {
        client_id,
        client_name,
        payment_terms: optional_non_empty(payload.payment_terms.as_deref(), "paymentTerms")?,
        discount: optional_non_negative_number(payload.discount.as_ref(), "discount")?,
        status: optional_non_empty(payload.status.as_deref(), "status")?,
        expiration_date,
        notes: payload.notes,
    });
    quote.items = items.into_iter().map(|item| QuoteItem::new(&quote.id, item)).collect();

    let created = state.quote_repo.create(&quote).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_quote(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<String>,
    ApiJson(payload): ApiJson<QuoteRequest>,
) -> Result<impl IntoResponse, AppError> {
    let items = payload
        .items
        .as_deref()
        .map(|items| validate_line_items(Some(items)))
        .transpose()?;

    let update = QuoteUpdate {
        client_id: optional_non_empty(payload.client_id.as_deref(), "clientId")?,
        client_name: optional_non_empty(payload.client_name.as_deref(), "clientName")?,
        payment_terms: optional_non_empty(payload.payment_terms.as_deref(), "paymentTerms")?,
        discount: optional_non_negative_number(payload.discount.as_ref(), "discount")?,
        status: optional_non_empty(payload.status.as_deref(), "status")?,
        expiration_date: parse_date(payload.expiration_date.as_deref(), "expirationDate")?,
        notes: payload.notes,
        items,
    };

    let updated = state.quote_repo.update(&quote_id, update).await?;
    Ok(Json(updated))
}

pub async fn delete_quote(
    State(state): State<Arc<AppState>>,
    Path(quote_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.quote_repo.delete(&quote_id).await?;
    info!("Deleted quote: {}", quote_id);
    Ok(StatusCode::NO_CONTENT)
}
