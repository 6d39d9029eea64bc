//! Anime entry entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;

use animotheque_core::types::{DbId, Timestamp};

/// One tracked anime, owned by exactly one user.
///
/// Serializes with camelCase field names (`lastEpisode`, `watchDate`) to
/// match the public API shape.
///
/// `status` is free text by design; the values the client currently sends
/// are `"fini"`, `"saison à venir"` and `"pas d'info"`, but the server does
/// not validate against that set. `watch_date` is likewise an unvalidated
/// client-supplied calendar date string. `sortie` is a release estimate,
/// only meaningful for upcoming seasons.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Anime {
    pub id: DbId,
    pub user_id: DbId,
    pub title: String,
    pub last_episode: Option<String>,
    pub episode: Option<i32>,
    pub watch_date: Option<String>,
    pub status: Option<String>,
    pub sortie: Option<String>,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Mutable field set shared by insert and full-replace update.
///
/// `title` presence is enforced at the API surface before this DTO is built;
/// everything else is optional and stored as given.
#[derive(Debug, Clone)]
pub struct AnimeFields {
    pub title: String,
    pub last_episode: Option<String>,
    pub episode: Option<i32>,
    pub watch_date: Option<String>,
    pub status: Option<String>,
    pub sortie: Option<String>,
    pub image: Option<String>,
}
