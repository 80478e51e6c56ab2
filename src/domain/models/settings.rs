use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserSettings {
    pub full_name: String,
    pub email: String,
    pub daily_goal: f64,
    pub start_of_week: String,
    pub treat_saturday_as_holiday: bool,
    pub enable_ai_insights: bool,
    pub language: String,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub daily_goal: Option<f64>,
    pub start_of_week: Option<String>,
    pub treat_saturday_as_holiday: Option<bool>,
    pub enable_ai_insights: Option<bool>,
    pub language: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct GeneralSettings {
    pub currency: String,
}
