//! Session-token extractor for admin handlers.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use chrono::{DateTime, Utc};
use codex_core::error::CoreError;

use crate::auth::jwt::validate_token;
use crate::error::AppError;
use crate::state::AppState;

/// Administrator session extracted from a JWT Bearer token in the
/// `Authorization` header.
///
/// Add it as a parameter to any handler that must only run after a
/// successful Identity Gate login:
///
/// ```ignore
/// async fn my_handler(admin: AdminSession) -> AppResult<StatusCode> {
///     tracing::info!(admin = %admin.identifier, "handling request");
///     Ok(StatusCode::NO_CONTENT)
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AdminSession {
    /// The administrator identifier (from `claims.sub`).
    pub identifier: String,
    /// When the session token stops being accepted.
    pub expires_at: DateTime<Utc>,
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| {
                AppError::Core(CoreError::Unauthorized(
                    "Missing Authorization header".into(),
                ))
            })?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Invalid Authorization format. Expected: Bearer <token>".into(),
            ))
        })?;

        let claims = validate_token(token, &state.config.jwt).map_err(|_| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        // Tokens minted for a previous admin identifier are not honoured.
        if claims.sub != state.gate.admin_identifier() {
            return Err(AppError::Core(CoreError::Unauthorized(
                "Invalid or expired token".into(),
            )));
        }

        let expires_at = DateTime::from_timestamp(claims.exp, 0).ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized("Invalid or expired token".into()))
        })?;

        Ok(AdminSession {
            identifier: claims.sub,
            expires_at,
        })
    }
}
