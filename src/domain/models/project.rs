use serde::Serialize;
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

pub const DEFAULT_PROJECT_COLOR: &str = "#3b82f6";

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub name: String,
    pub client_id: String,
    pub color: String,
    pub description: Option<String>,
    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,
}

impl Project {
    pub fn new(name: String, client_id: String, color: Option<String>, description: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            client_id,
            color: color.unwrap_or_else(|| DEFAULT_PROJECT_COLOR.to_string()),
            description,
            created_at: Utc::now(),
        }
    }
}
