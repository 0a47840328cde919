//! Route definitions for the public `/characters` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::character;
use crate::state::AppState;

/// Routes mounted at `/characters`.
///
/// ```text
/// GET /            -> list (?q=)
/// GET /search      -> search (?q=)
/// GET /featured    -> featured
/// GET /{id}        -> get_by_id
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(character::list))
        .route("/search", get(character::search))
        .route("/featured", get(character::featured))
        .route("/{id}", get(character::get_by_id))
}
