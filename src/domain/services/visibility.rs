//! Role-scoped visibility.
//!
//! Every collection endpoint asks [`resolve`] which rows the caller may see and hands the
//! resulting [`Scope`] to its repository, which turns it into a `WHERE` clause. By-id
//! lookups of scoped resources go through the same scope (see [`Scope::permits_work_unit`]).

use crate::domain::models::user::{Role, User};
use crate::error::AppError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Clients,
    Projects,
    Tasks,
    Users,
    WorkUnits,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Scope {
    /// Unrestricted listing.
    All,
    /// Rows reachable through the user's own assignment rows.
    AssignedTo(String),
    /// Work units whose manager set contains the user.
    ManagedBy(String),
    /// Users holding the plain `user` role, plus the caller.
    Subordinates(String),
    /// Only the caller's own row.
    OnlySelf(String),
    Denied,
}

pub fn resolve(caller: &User, resource: Resource) -> Scope {
    let caller_id = caller.id.clone();
    match (caller.role, resource) {
        (Role::Admin, _) => Scope::All,

        // Managers are not restricted by assignments on these resources.
        (Role::Manager, Resource::Clients | Resource::Projects | Resource::Tasks) => Scope::All,
        (Role::Manager, Resource::WorkUnits) => Scope::ManagedBy(caller_id),
        (Role::Manager, Resource::Users) => Scope::Subordinates(caller_id),

        (Role::User, Resource::Clients | Resource::Projects | Resource::Tasks) => Scope::AssignedTo(caller_id),
        (Role::User, Resource::Users) => Scope::OnlySelf(caller_id),
        (Role::User, Resource::WorkUnits) => Scope::Denied,
    }
}

impl Scope {
    /// Turns a `Denied` scope into a 403 before any query runs.
    pub fn require_visible(self) -> Result<Self, AppError> {
        match self {
            Scope::Denied => Err(AppError::Forbidden("Insufficient permissions".into())),
            scope => Ok(scope),
        }
    }

    /// Whether a work unit with the given manager ids falls inside this scope.
    pub fn permits_work_unit<'a>(&self, mut manager_ids: impl Iterator<Item = &'a str>) -> bool {
        match self {
            Scope::All => true,
            Scope::ManagedBy(user_id) => manager_ids.any(|id| id == user_id),
            _ => false,
        }
    }
}
