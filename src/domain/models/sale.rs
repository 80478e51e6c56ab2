use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;
use super::line_item::NewLineItem;
use super::quote::DEFAULT_PAYMENT_TERMS;

pub const DEFAULT_SALE_STATUS: &str = "pending";

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Sale {
    pub id: String,
    pub linked_quote_id: Option<String>,
    pub client_id: String,
    pub client_name: String,
    pub payment_terms: String,
    pub discount: f64,
    pub status: String,
    pub notes: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub items: Vec<SaleItem>,
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub id: String,
    pub sale_id: String,
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub discount: f64,
}

impl SaleItem {
    pub fn new(sale_id: &str, item: NewLineItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sale_id: sale_id.to_string(),
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
        }
    }
}

pub struct NewSaleParams {
    pub linked_quote_id: Option<String>,
    pub client_id: String,
    pub client_name: String,
    pub payment_terms: Option<String>,
    pub discount: Option<f64>,
    pub status: Option<String>,
    pub notes: Option<String>,
}

impl Sale {
    pub fn new(params: NewSaleParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            linked_quote_id: params.linked_quote_id,
            client_id: params.client_id,
            client_name: params.client_name,
            payment_terms: params.payment_terms.unwrap_or_else(|| DEFAULT_PAYMENT_TERMS.to_string()),
            discount: params.discount.unwrap_or(0.0),
            status: params.status.unwrap_or_else(|| DEFAULT_SALE_STATUS.to_string()),
            notes: params.notes,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }
}

#[derive(Default)]
pub struct SaleUpdate {
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub payment_terms: Option<String>,
    pub discount: Option<f64>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub items: Option<Vec<NewLineItem>>,
}
