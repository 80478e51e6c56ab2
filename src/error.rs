use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Unauthorized: {0}")]
    Unauthorized(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Referenced resource missing: {0}")]
    Referential(String),
    #[error("Internal server error")]
    Internal,
    #[error("Internal server error: {0}")]
    InternalWithMsg(String),
}

// SQLite extended result codes: 2067 UNIQUE, 1555 PRIMARY KEY.
const UNIQUE_CODES: [&str; 2] = ["2067", "1555"];
// 787 FOREIGN KEY.
const FOREIGN_KEY_CODES: [&str; 1] = ["787"];

impl AppError {
    /// Maps a store error to `Referential` when it is a foreign-key violation,
    /// keeping every other failure as-is.
    pub fn referential(e: sqlx::Error, message: &str) -> Self {
        if is_foreign_key_violation(&e) {
            AppError::Referential(message.to_string())
        } else {
            AppError::Database(e)
        }
    }

    /// Maps a store error to `Conflict` when it is a unique violation.
    pub fn conflict(e: sqlx::Error, message: &str) -> Self {
        if is_unique_violation(&e) {
            AppError::Conflict(message.to_string())
        } else {
            AppError::Database(e)
        }
    }
}

fn db_code(e: &sqlx::Error) -> Option<String> {
    e.as_database_error()
        .and_then(|db_err| db_err.code())
        .map(|code| code.into_owned())
}

pub fn is_unique_violation(e: &sqlx::Error) -> bool {
    db_code(e).is_some_and(|code| UNIQUE_CODES.contains(&code.as_str()))
}

pub fn is_foreign_key_violation(e: &sqlx::Error) -> bool {
    db_code(e).is_some_and(|code| FOREIGN_KEY_CODES.contains(&code.as_str()))
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Database(e) => {
                if is_unique_violation(e) {
                    (StatusCode::CONFLICT, "Resource already exists (duplicate entry)".to_string())
                } else if is_foreign_key_violation(e) {
                    (StatusCode::BAD_REQUEST, "Referenced resource does not exist".to_string())
                } else {
                    error!("Database error: {:?}", e);
                    (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
                }
            }
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, msg.clone()),
            AppError::Forbidden(msg) => (StatusCode::FORBIDDEN, msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Referential(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Internal => (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string()),
            AppError::InternalWithMsg(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
