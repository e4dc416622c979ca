// API error taxonomy
//
// Every failure leaving a handler is one of these; the response body is
// always structured `{code, message, details}`. Infrastructure failures
// are logged with their cause and answered with a generic message so
// connection strings and upstream internals never reach the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

use devevent_core::ValidationError;
use devevent_storage::{ConnectError, StorageError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(ValidationError),
    #[error("{0}")]
    DuplicateKey(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("not found")]
    NotFound,
    #[error("internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Machine-readable error code string.
    fn error_code(&self) -> &'static str {
        match self {
            ApiError::Validation(_) => "VALIDATION",
            ApiError::DuplicateKey(_) => "DUPLICATE_KEY",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::NotFound => "NOT_FOUND",
            ApiError::Internal(_) => "INTERNAL_ERROR",
        }
    }

    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::DuplicateKey(_) => StatusCode::BAD_REQUEST,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let code = self.error_code();

        let (message, details) = match &self {
            ApiError::Validation(err) => (
                "validation failed".to_string(),
                json!(err.errors),
            ),
            ApiError::DuplicateKey(msg) => (msg.clone(), Value::Null),
            ApiError::Internal(err) => {
                tracing::error!("API internal error: {err:#}");
                ("internal server error".to_string(), Value::Null)
            }
            other => (other.to_string(), Value::Null),
        };

        let body = json!({
            "code": code,
            "message": message,
            "details": details,
        });

        (status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(e: ValidationError) -> Self {
        ApiError::Validation(e)
    }
}

impl From<StorageError> for ApiError {
    fn from(e: StorageError) -> Self {
        match e {
            StorageError::DuplicateKey { constraint } => {
                ApiError::DuplicateKey(duplicate_message(&constraint))
            }
            StorageError::Database(err) => ApiError::Internal(anyhow::Error::new(err)),
        }
    }
}

impl From<ConnectError> for ApiError {
    fn from(e: ConnectError) -> Self {
        ApiError::Internal(anyhow::Error::new(e))
    }
}

/// Map a unique-index name to the user-facing duplicate message.
fn duplicate_message(constraint: &str) -> String {
    if constraint.contains("slug") {
        "An event with this slug already exists".to_string()
    } else if constraint.contains("bookings") {
        "This email has already booked this event".to_string()
    } else {
        "A record with these values already exists".to_string()
    }
}
