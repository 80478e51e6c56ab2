use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ManagerRef {
    pub id: String,
    pub name: String,
}

/// A work unit joined with its managers and live member count.
#[derive(Debug, Serialize, FromRow, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WorkUnitView {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub is_disabled: bool,
    #[sqlx(json)]
    pub managers: Vec<ManagerRef>,
    pub user_count: i64,
}

pub struct NewWorkUnit {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub manager_ids: Vec<String>,
}

impl NewWorkUnit {
    pub fn new(name: String, description: Option<String>, manager_ids: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            description,
            manager_ids,
        }
    }
}

#[derive(Default)]
pub struct WorkUnitUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub is_disabled: Option<bool>,
    pub manager_ids: Option<Vec<String>>,
}
