use crate::domain::models::line_item::RawLineItem;
use serde::Deserialize;
use serde_json::Value;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub username: Option<String>,
    pub password: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub role: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateClientRequest {
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub name: Option<String>,
    pub client_id: Option<String>,
    pub color: Option<String>,
    pub description: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    pub name: Option<String>,
    pub project_id: Option<String>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_recurring: Option<bool>,
    pub recurrence_pattern: Option<String>,
    pub recurrence_start: Option<String>,
    pub recurrence_end: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkUnitRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub manager_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkUnitRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_disabled: Option<bool>,
    pub manager_ids: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkUnitUsersRequest {
    pub user_ids: Option<Vec<String>>,
}

/// Body of both quote create and quote update.
#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub payment_terms: Option<String>,
    pub discount: Option<Value>,
    pub status: Option<String>,
    pub expiration_date: Option<String>,
    pub notes: Option<String>,
    pub items: Option<Vec<RawLineItem>>,
}

#[derive(Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SaleRequest {
    pub linked_quote_id: Option<String>,
    pub client_id: Option<String>,
    pub client_name: Option<String>,
    pub payment_terms: Option<String>,
    pub discount: Option<Value>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub items: Option<Vec<RawLineItem>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    pub current_password: Option<String>,
    pub new_password: Option<String>,
}

#[derive(Deserialize)]
pub struct UpdateGeneralSettingsRequest {
    pub currency: Option<String>,
}
