use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;
use super::line_item::NewLineItem;

pub const DEFAULT_PAYMENT_TERMS: &str = "immediate";
pub const DEFAULT_QUOTE_STATUS: &str = "quoted";

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub client_id: String,
    pub client_name: String,
    pub payment_terms: String,
    pub discount: f64,
    pub status: String,
    pub expiration_date: NaiveDate,
    pub notes: Option<String>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub updated_at: DateTime<Utc>,
    #[sqlx(skip)]
    pub items: Vec<QuoteItem>,
}

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct QuoteItem {
    pub id: String,
    pub quote_id: String,
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub discount: f64,
}

impl QuoteItem {
    pub fn new(quote_id: &str, item: NewLineItem) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            quote_id: quote_id.to_string(),
            product_id: item.product_id,
            product_name: item.product_name,
            quantity: item.quantity,
            unit_price: item.unit_price,
            discount: item.discount,
        }
    }
}

pub struct NewQuoteParams {
    pub client_id: String,
    pub client_name: String,
    pub payment_terms: Option<String>,
    pub discount: Option<f64>,
    pub status: Option<String>,
    pub expiration_date: NaiveDate,
    pub notes: Option<String>,
}

impl Quote {
    pub fn new(params: NewQuoteParams) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            client_id: params.client_id,
            client_name: params.client_name,
            payment_terms: params.payment_terms.unwrap_or_else(|| DEFAULT_PAYMENT_TERMS.to_string()),
            discount: params.discount.unwrap_or(0.0),
            status: params.status.unwrap_or_else(|| DEFAULT_QUOTE_STATUS.to_string()),
            expiration_date: params.expiration_date,
            notes: params.notes,
            created_at: now,
            updated_at: now,
            items: Vec::new(),
        }
    }
}

/// Header patch: `None` keeps the stored value. `items: Some` replaces the whole item set.
#[derive(Default)]
pub struct QuoteUpdate {
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub payment_terms: Option<String>,
    pub discount: Option<f64>,
    pub status: Option<String>,
    pub expiration_date: Option<NaiveDate>,
    pub notes: Option<String>,
    pub items: Option<Vec<NewLineItem>>,
}
