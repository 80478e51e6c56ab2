use axum::{
    extract::{Request, State},
    http::{header::AUTHORIZATION, HeaderMap},
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::{warn, Span};
use crate::domain::models::user::{Role, User};
use crate::error::AppError;
use crate::state::AppState;

fn bearer_token(headers: &HeaderMap) -> Result<&str, AppError> {
    headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or_else(|| AppError::Unauthorized("Missing bearer token".into()))
}

/// Verifies the bearer token and re-reads the user it names, so role changes and
/// deletions apply to tokens already issued.
pub async fn authenticate(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let token = bearer_token(request.headers())?;
    let user_id = state.auth_service.verify_token(token)?;

    let user = state
        .user_repo
        .find_by_id(&user_id)
        .await?
        .ok_or_else(|| AppError::Unauthorized("User no longer exists".into()))?;

    Span::current().record("user_id", user.id.as_str());
    request.extensions_mut().insert(user);
    Ok(next.run(request).await)
}

/// A missing identity means the authentication guard did not run first.
pub fn require_role(identity: Option<&User>, allowed: &[Role]) -> Result<(), AppError> {
    let user = identity.ok_or_else(|| AppError::Unauthorized("Authentication required".into()))?;
    if !allowed.contains(&user.role) {
        warn!(user_id = %user.id, role = %user.role, "Role guard rejected request");
        return Err(AppError::Forbidden("Insufficient permissions".into()));
    }
    Ok(())
}

pub async fn require_admin(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(request.extensions().get::<User>(), &[Role::Admin])?;
    Ok(next.run(request).await)
}

pub async fn require_manager(request: Request, next: Next) -> Result<Response, AppError> {
    require_role(request.extensions().get::<User>(), &[Role::Admin, Role::Manager])?;
    Ok(next.run(request).await)
}
