use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;
use crate::api::dtos::requests::SaleRequest;
use crate::api::extractors::json::ApiJson;
use crate::domain::models::sale::{NewSaleParams, Sale, SaleItem, SaleUpdate};
use crate::domain::services::validation::{
    optional_non_empty, optional_non_negative_number, require_non_empty, validate_line_items,
};
use crate::error::AppError;
use crate::state::AppState;

pub async fn list_sales(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, AppError> {
    let sales = state.sale_repo.list().await?;
    Ok(Json(sales))
}

pub async fn create_sale(
    State(state): State<Arc<AppState>>,
    ApiJson(payload): ApiJson<SaleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let client_id = require_non_empty(payload.client_id.as_deref(), "clientId")?;
    let client_name = require_non_empty(payload.client_name.as_deref(), "clientName")?;
    let items = validate_line_items(payload.items.as_deref())?;

    let mut sale = Sale::new(NewSaleParams {
        linked_quote_id: optional_non_empty(payload.linked_quote_id.as_deref(), "linkedQuoteId")?,
        client_id,
        client_name,
        payment_terms: optional_non_empty(payload.payment_terms.as_deref(), "paymentTerms")?,
        discount: optional_non_negative_number(payload.discount.as_ref(), "discount")?,
        status: optional_non_empty(payload.status.as_deref(), "status")?,
        notes: payload.notes,
    });
    sale.items = items.into_iter().map(|item| SaleItem::new(&sale.id, item)).collect();

    let created = state.sale_repo.create(&sale).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update_sale(
    State(state): State<Arc<AppState>>,
    Path(sale_id): Path<String>,
    ApiJson(payload): ApiJson<SaleRequest>,
) -> Result<impl IntoResponse, AppError> {
    let items = payload
        .items
        .as_deref()
        .map(|items| validate_line_items(Some(items)))
        .transpose()?;

    let update = SaleUpdate {
        client_id: optional_non_empty(payload.client_id.as_deref(), "clientId")?,
        client_name: optional_non_empty(payload.client_name.as_deref(), "clientName")?,
        payment_terms: optional_non_empty(payload.payment_terms.as_deref(), "paymentTerms")?,
        discount: optional_non_negative_number(payload.discount.as_ref(), "discount")?,
        status: optional_non_empty(payload.status.as_deref(), "status")?,
        notes: payload.notes,
        items,
    };

    let updated = state.sale_repo.update(&sale_id, update).await?;
    Ok(Json(updated))
}

pub async fn delete_sale(
    State(state): State<Arc<AppState>>,
    Path(sale_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    state.sale_repo.delete(&sale_id).await?;
    info!("Deleted sale: {}", sale_id);
    Ok(StatusCode::NO_CONTENT)
}
