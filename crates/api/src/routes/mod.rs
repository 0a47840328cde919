pub mod admin;
pub mod auth;
pub mod character;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /characters                      list (?q=)
/// /characters/search               name search (?q=)
/// /characters/featured             all characters, shuffled
/// /characters/{id}                 detail
///
/// /auth/login                      login (public)
/// /auth/session                    current session (requires auth)
///
/// /admin/characters                create (requires auth)
/// /admin/characters/{id}           update, delete (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/characters", character::router())
        .nest("/auth", auth::router())
        .nest("/admin", admin::router())
}
