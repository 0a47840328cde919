//! Route definitions for `/admin`. Every handler requires an admin session.

use axum::routing::{patch, post};
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/admin`.
///
/// ```text
/// POST   /characters         -> create
/// PATCH  /characters/{id}    -> update
/// DELETE /characters/{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/characters", post(character::create))
        .route(
            "/characters/{id}",
            patch(character::update).delete(character::delete),
        )
}
