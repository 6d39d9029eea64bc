//! Handlers for the `/api/animes` resource.
//!
//! Every handler resolves the owner from the [`AuthUser`] extractor; a
//! client-supplied user id is never trusted. Reads and writes are scoped to
//! that owner at the repository layer, so a foreign entry id behaves exactly
//! like a missing one.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use animotheque_core::error::CoreError;
use animotheque_core::types::DbId;
use animotheque_db::models::anime::{Anime, AnimeFields};
use animotheque_db::repositories::AnimeRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::MessageResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/animes` and `PUT /api/animes/{id}`.
///
/// PUT is a full replace: fields omitted from the body are cleared, not
/// preserved. Only `title` is required; everything else is stored as given,
/// including free-text `status` and `watchDate` (deliberately unvalidated).
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeRequest {
    pub title: Option<String>,
    pub last_episode: Option<String>,
    pub episode: Option<i32>,
    pub watch_date: Option<String>,
    pub status: Option<String>,
    pub sortie: Option<String>,
    pub image: Option<String>,
}

impl AnimeRequest {
    /// Validate presence of `title` and convert into the repo field set.
    fn into_fields(self) -> Result<AnimeFields, AppError> {
        let title = self
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .ok_or_else(|| AppError::Core(CoreError::Validation("Title is required".into())))?;

        Ok(AnimeFields {
            title,
            last_episode: self.last_episode,
            episode: self.episode,
            watch_date: self.watch_date,
            status: self.status,
            sortie: self.sortie,
            image: self.image,
        })
    }
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/animes
///
/// List the authenticated user's entries in insertion order.
pub async fn list(State(state): State<AppState>, user: AuthUser) -> AppResult<Json<Vec<Anime>>> {
    let animes = AnimeRepo::list_by_owner(&state.pool, user.user_id).await?;
    Ok(Json(animes))
}

/// POST /api/animes
pub async fn create(
    State(state): State<AppState>,
    user: AuthUser,
    Json(input): Json<AnimeRequest>,
) -> AppResult<(StatusCode, Json<Anime>)> {
    let fields = input.into_fields()?;
    let anime = AnimeRepo::create(&state.pool, user.user_id, &fields).await?;
    Ok((StatusCode::CREATED, Json(anime)))
}

/// PUT /api/animes/{id}
///
/// Full replace of the mutable fields. 404 when no entry owned by the
/// caller matches -- another user's entry is indistinguishable from a
/// missing one.
pub async fn update(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<AnimeRequest>,
) -> AppResult<Json<Anime>> {
    let fields = input.into_fields()?;
    let anime = AnimeRepo::update(&state.pool, id, user.user_id, &fields)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Anime", id }))?;
    Ok(Json(anime))
}

/// DELETE /api/animes/{id}
///
/// Idempotent: deleting a missing or foreign entry is a no-op success.
pub async fn delete(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<MessageResponse>> {
    AnimeRepo::delete(&state.pool, id, user.user_id).await?;
    Ok(Json(MessageResponse::new("Anime deleted")))
}
