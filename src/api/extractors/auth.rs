use axum::{extract::FromRequestParts, http::request::Parts};
use crate::domain::models::user::User;
use crate::error::AppError;

/// The caller as re-read from the store by the authentication guard.
pub struct AuthUser(pub User);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<User>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| AppError::Unauthorized("Authentication required".into()))
    }
}
