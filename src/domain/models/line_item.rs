use serde::Deserialize;
use serde_json::Value;

/// Line item exactly as submitted; numeric fields may arrive as numbers or numeric strings.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawLineItem {
    pub product_id: Option<String>,
    pub product_name: Option<String>,
    pub quantity: Option<Value>,
    pub unit_price: Option<Value>,
    pub discount: Option<Value>,
}

/// A validated line item ready to be written under a quote or sale header.
#[derive(Debug, Clone, PartialEq)]
pub struct NewLineItem {
    pub product_id: Option<String>,
    pub product_name: String,
    pub quantity: f64,
    pub unit_price: f64,
    pub discount: f64,
}
