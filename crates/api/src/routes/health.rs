use axum::extract::State;
use axum::{routing::get, Json, Router};
use codex_store::StoreMode;
use serde::Serialize;

use crate::auth::gate::IdentityMode;
use crate::state::AppState;

/// Health check response payload.
#[derive(Serialize)]
pub struct HealthResponse {
    /// Overall service status.
    pub status: &'static str,
    /// Crate version from Cargo.toml.
    pub version: &'static str,
    /// Live store or demo dataset.
    pub store_mode: StoreMode,
    /// Document store adapter (`rtdb`, `memory`, `demo`).
    pub store_kind: &'static str,
    /// How admin logins are verified.
    pub identity_mode: IdentityMode,
}

/// GET /health -- returns service status and the configured backends.
async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        store_mode: state.repo.mode(),
        store_kind: state.repo.kind(),
        identity_mode: state.gate.mode(),
    })
}

/// Mount health check routes (intended for root-level, NOT under `/api/v1`).
pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
