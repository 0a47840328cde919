//! Handlers for the `/auth` resource (login, session).

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::auth::gate::IdentityMode;
use crate::auth::jwt::generate_session_token;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/login`. The identifier is fixed by
/// configuration, so only the password is sent.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    /// Session lifetime in seconds.
    pub expires_in: i64,
    pub session: SessionInfo,
}

/// The current admin session.
#[derive(Debug, Serialize)]
pub struct SessionInfo {
    pub identifier: String,
    pub expires_at: DateTime<Utc>,
    pub identity_mode: IdentityMode,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/login
///
/// Check the password through the Identity Gate and issue a session token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<DataResponse<LoginResponse>>> {
    let admin = state
        .gate
        .authenticate(&input.password)
        .await
        .map_err(|failure| AppError::auth_rejected(failure, state.gate.admin_identifier()))?;

    let jwt = &state.config.jwt;
    let access_token = generate_session_token(&admin.identifier, jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;
    let expires_in = jwt.session_expiry_mins * 60;

    Ok(Json(DataResponse {
        data: LoginResponse {
            access_token,
            expires_in,
            session: SessionInfo {
                identifier: admin.identifier,
                expires_at: Utc::now() + chrono::Duration::seconds(expires_in),
                identity_mode: state.gate.mode(),
            },
        },
    }))
}

/// GET /api/v1/auth/session
///
/// Echo the session carried by the bearer token.
pub async fn session(
    State(state): State<AppState>,
    admin: AdminSession,
) -> Json<DataResponse<SessionInfo>> {
    Json(DataResponse {
        data: SessionInfo {
            identifier: admin.identifier,
            expires_at: admin.expires_at,
            identity_mode: state.gate.mode(),
        },
    })
}
