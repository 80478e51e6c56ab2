use serde::{Deserialize, Serialize};

/// A junction table holding (owner, member) pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    UserClients,
    UserProjects,
    UserTasks,
    WorkUnitMembers,
    WorkUnitManagers,
}

impl Relation {
    pub fn table(&self) -> &'static str {
        match self {
            Relation::UserClients => "user_clients",
            Relation::UserProjects => "user_projects",
            Relation::UserTasks => "user_tasks",
            Relation::WorkUnitMembers => "user_work_units",
            Relation::WorkUnitManagers => "work_unit_managers",
        }
    }

    pub fn owner_column(&self) -> &'static str {
        match self {
            Relation::UserClients | Relation::UserProjects | Relation::UserTasks => "user_id",
            Relation::WorkUnitMembers | Relation::WorkUnitManagers => "work_unit_id",
        }
    }

    pub fn member_column(&self) -> &'static str {
        match self {
            Relation::UserClients => "client_id",
            Relation::UserProjects => "project_id",
            Relation::UserTasks => "task_id",
            Relation::WorkUnitMembers | Relation::WorkUnitManagers => "user_id",
        }
    }
}

#[derive(Debug, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserAssignments {
    pub client_ids: Vec<String>,
    pub project_ids: Vec<String>,
    pub task_ids: Vec<String>,
}

/// Target sets for a user's assignments. An absent list leaves that relation untouched,
/// a present one (even empty) replaces it.
#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct AssignmentUpdate {
    pub client_ids: Option<Vec<String>>,
    pub project_ids: Option<Vec<String>>,
    pub task_ids: Option<Vec<String>>,
}

impl AssignmentUpdate {
    pub fn replacements(&self) -> Vec<(Relation, &[String])> {
        [
            (Relation::UserClients, &self.client_ids),
            (Relation::UserProjects, &self.project_ids),
            (Relation::UserTasks, &self.task_ids),
        ]
            .into_iter()
            .filter_map(|(relation, ids)| ids.as_deref().map(|ids| (relation, ids)))
            .collect()
    }
}
