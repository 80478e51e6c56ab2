use crate::domain::models::line_item::{NewLineItem, RawLineItem};
use crate::error::AppError;
use chrono::{DateTime, NaiveDate};
use serde_json::Value;

fn invalid(message: String) -> AppError {
    AppError::Validation(message)
}

pub fn require_non_empty(value: Option<&str>, field: &str) -> Result<String, AppError> {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(invalid(format!("{} is required", field))),
    }
}

/// Absent stays absent; present must not be blank.
pub fn optional_non_empty(value: Option<&str>, field: &str) -> Result<Option<String>, AppError> {
    value.map(|v| require_non_empty(Some(v), field)).transpose()
}

fn parse_number(value: &Value, field: &str) -> Result<f64, AppError> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    parsed
        .filter(|n| n.is_finite())
        .ok_or_else(|| invalid(format!("{} must be a number", field)))
}

fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

pub fn parse_positive_number(value: Option<&Value>, field: &str) -> Result<f64, AppError> {
    let value = present(value).ok_or_else(|| invalid(format!("{} is required", field)))?;
    let n = parse_number(value, field)?;
    if n <= 0.0 {
        return Err(invalid(format!("{} must be greater than 0", field)));
    }
    Ok(n)
}

pub fn parse_non_negative_number(value: Option<&Value>, field: &str) -> Result<f64, AppError> {
    let value = present(value).ok_or_else(|| invalid(format!("{} is required", field)))?;
    let n = parse_number(value, field)?;
    if n < 0.0 {
        return Err(invalid(format!("{} must be 0 or greater", field)));
    }
    Ok(n)
}

pub fn optional_non_negative_number(value: Option<&Value>, field: &str) -> Result<Option<f64>, AppError> {
    present(value)
        .map(|v| parse_non_negative_number(Some(v), field))
        .transpose()
}

/// Accepts `YYYY-MM-DD` or a full RFC 3339 timestamp, keeping only the date.
pub fn parse_date(value: Option<&str>, field: &str) -> Result<Option<NaiveDate>, AppError> {
    let Some(raw) = value.map(str::trim).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| DateTime::parse_from_rfc3339(raw).map(|dt| dt.date_naive()))
        .map(Some)
        .map_err(|_| invalid(format!("{} must be a date (YYYY-MM-DD)", field)))
}

/// Validates a non-empty item list, naming the offending path (`items[2].quantity`).
pub fn validate_line_items(items: Option<&[RawLineItem]>) -> Result<Vec<NewLineItem>, AppError> {
    let items = match items {
        Some(items) if !items.is_empty() => items,
        _ => return Err(invalid("items must be a non-empty array".to_string())),
    };

    items
        .iter()
        .enumerate()
        .map(|(i, item)| {
            Ok::<_, AppError>(NewLineItem {
                product_id: item.product_id.clone().filter(|id| !id.trim().is_empty()),
                product_name: require_non_empty(item.product_name.as_deref(), &format!("items[{}].productName", i))?,
                quantity: parse_positive_number(item.quantity.as_ref(), &format!("items[{}].quantity", i))?,
                unit_price: parse_non_negative_number(item.unit_price.as_ref(), &format!("items[{}].unitPrice", i))?,
                discount: optional_non_negative_number(item.discount.as_ref(), &format!("items[{}].discount", i))?
                    .unwrap_or(0.0),
            })
        })
        .collect()
}
