use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use codex_core::error::CoreError;
use codex_store::StoreError;
use serde_json::json;

use crate::auth::gate::AuthFailure;
use crate::messages::{auth_failure_code, auth_failure_message};

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors, [`StoreError`] for record store
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`]
/// to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `codex_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A write-path error from the record store.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The Identity Gate refused a login. `message` is the user-facing text.
    #[error("Login refused: {failure}")]
    AuthRejected {
        failure: AuthFailure,
        message: String,
    },

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl AppError {
    /// Attach user-facing text to a refused login.
    pub fn auth_rejected(failure: AuthFailure, admin_identifier: &str) -> Self {
        let message = auth_failure_message(&failure, admin_identifier);
        AppError::AuthRejected { failure, message }
    }
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
            },

            // --- Store errors ---
            AppError::Store(err) => classify_store_error(err),

            // --- Identity Gate ---
            AppError::AuthRejected { failure, message } => {
                let status = match failure {
                    AuthFailure::RateLimited => StatusCode::TOO_MANY_REQUESTS,
                    AuthFailure::Unexpected(_) => StatusCode::BAD_GATEWAY,
                    _ => StatusCode::UNAUTHORIZED,
                };
                (status, auth_failure_code(failure), message.clone())
            }

            // --- HTTP-specific errors ---
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a store error into an HTTP status, error code, and message.
///
/// - `NotFound` maps to 404.
/// - `InvalidKey` maps to 400.
/// - Everything else means the store could not be used and maps to 502 with
///   a sanitized message.
fn classify_store_error(err: &StoreError) -> (StatusCode, &'static str, String) {
    match err {
        StoreError::NotFound { id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("Character with id {id} not found"),
        ),
        StoreError::InvalidKey(key) => (
            StatusCode::BAD_REQUEST,
            "INVALID_ID",
            format!("Invalid character id: {key:?}"),
        ),
        other => {
            tracing::error!(error = %other, "Record store error");
            (
                StatusCode::BAD_GATEWAY,
                "STORE_UNAVAILABLE",
                "The record store is unavailable".to_string(),
            )
        }
    }
}
