//! Handlers for the `/characters` resource and its admin mutations.
//!
//! Public reads go through the repository's fail-open path, so a broken
//! store shows up as an empty list rather than an error. Admin writes
//! (`/admin/characters`) require an [`AdminSession`] and propagate every
//! store failure.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use codex_core::character::{Character, CreateCharacter, UpdateCharacter};
use codex_core::error::CoreError;
use codex_core::search::{filter_by_name, shuffle_for_display};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AdminSession;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/characters?q=
///
/// All characters, narrowed to names containing `q` when it is non-empty.
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<DataResponse<Vec<Character>>> {
    let characters = state.repo.list(&params.q).await;
    Json(DataResponse { data: characters })
}

/// GET /api/v1/characters/search?q=
///
/// Name search. A blank query matches nothing.
pub async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> Json<DataResponse<Vec<Character>>> {
    let all = state.repo.list("").await;
    let matches = filter_by_name(&all, &params.q).into_iter().cloned().collect();
    Json(DataResponse { data: matches })
}

/// GET /api/v1/characters/featured
///
/// Every character in random order.
pub async fn featured(State(state): State<AppState>) -> Json<DataResponse<Vec<Character>>> {
    let all = state.repo.list("").await;
    let shuffled = shuffle_for_display(all, &mut rand::rng());
    Json(DataResponse { data: shuffled })
}

/// GET /api/v1/characters/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DataResponse<Character>>> {
    let character = state
        .repo
        .get_by_id(&id)
        .await
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Character",
            id,
        }))?;
    Ok(Json(DataResponse { data: character }))
}

/// POST /api/v1/admin/characters
pub async fn create(
    State(state): State<AppState>,
    admin: AdminSession,
    Json(input): Json<CreateCharacter>,
) -> AppResult<(StatusCode, Json<DataResponse<Character>>)> {
    input.validate().map_err(CoreError::from)?;
    let character = state.repo.create(&input).await?;
    tracing::info!(admin = %admin.identifier, id = ?character.id, "Admin created character");
    Ok((StatusCode::CREATED, Json(DataResponse { data: character })))
}

/// PATCH /api/v1/admin/characters/{id}
///
/// Only the fields present in the body are changed.
pub async fn update(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
    Json(input): Json<UpdateCharacter>,
) -> AppResult<StatusCode> {
    input.validate().map_err(CoreError::from)?;
    state.repo.update(&id, &input).await?;
    tracing::info!(admin = %admin.identifier, id = %id, "Admin updated character");
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /api/v1/admin/characters/{id}
///
/// Deleting an id that does not exist also returns 204.
pub async fn delete(
    State(state): State<AppState>,
    admin: AdminSession,
    Path(id): Path<String>,
) -> AppResult<StatusCode> {
    state.repo.delete(&id).await?;
    tracing::info!(admin = %admin.identifier, id = %id, "Admin deleted character");
    Ok(StatusCode::NO_CONTENT)
}
