//! API error types and the canonical error normalization step.
//!
//! # Purpose
//! Centralizes HTTP error response construction so every endpoint maps the
//! reconciler error taxonomy to the same response shape and status codes.
//! Handlers convert [`AdminError`] via `From`, which keeps the mapping in one
//! place instead of per-endpoint ad-hoc shaping.
use crate::admin::AdminError;
use crate::api::types::ErrorResponse;
use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;

/// Structured API error returned by handlers: an HTTP status code coupled
/// with a JSON error body carrying a stable `code` and a human-readable
/// message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub body: ErrorResponse,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status, Json(self.body)).into_response()
    }
}

fn api_error(status: StatusCode, code: &str, message: impl Into<String>) -> ApiError {
    ApiError {
        status,
        body: ErrorResponse {
            code: code.to_string(),
            message: message.into(),
            request_id: None,
        },
    }
}

pub fn api_internal_message(message: &str) -> ApiError {
    api_error(StatusCode::INTERNAL_SERVER_ERROR, "internal", message)
}

impl From<AdminError> for ApiError {
    fn from(err: AdminError) -> Self {
        match err {
            AdminError::InvalidDuration(_) | AdminError::MissingName => {
                api_error(StatusCode::BAD_REQUEST, "validation_error", err.to_string())
            }
            AdminError::InvalidArgument(_) => {
                api_error(StatusCode::BAD_REQUEST, "invalid_argument", err.to_string())
            }
            AdminError::NotFound(_) => {
                api_error(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            AdminError::AlreadyExists(_) => {
                api_error(StatusCode::CONFLICT, "already_exists", err.to_string())
            }
            AdminError::Unavailable(_) => {
                api_error(StatusCode::SERVICE_UNAVAILABLE, "unavailable", err.to_string())
            }
            AdminError::Unexpected(inner) => {
                // Log internal details server-side; return a generic message.
                tracing::error!(error = ?inner, "adminplane backend error");
                api_internal_message("backend request failed")
            }
        }
    }
}
