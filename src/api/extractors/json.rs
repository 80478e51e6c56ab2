use axum::extract::FromRequest;
use crate::error::AppError;

/// `axum::Json` whose rejection answers with the service error body.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(AppError))]
pub struct ApiJson<T>(pub T);
