use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::recommend::validation::ValidationError;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    /// Request rejected before any remote call was made.
    #[error("{0}")]
    Validation(String),

    /// The remote Space call (or the shaping of its result) failed.
    /// `action` is the human-readable verb phrase for the route, e.g.
    /// "get recommendations".
    #[error("Failed to {action}: {message}")]
    Upstream {
        action: &'static str,
        message: String,
    },

    /// Connection-test failure. Same cause as `Upstream`, different body
    /// shape: `{success: false, error}` instead of a bare `error`.
    #[error("Connection test failed: {0}")]
    ConnectionTest(String),
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Validation(message) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": message })),
            )
                .into_response(),
            AppError::Upstream { .. } => {
                tracing::error!("remote call failed: {self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": self.to_string() })),
                )
                    .into_response()
            }
            AppError::ConnectionTest(_) => {
                tracing::error!("{self}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "success": false, "error": self.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
