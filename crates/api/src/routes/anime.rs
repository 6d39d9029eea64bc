//! Route definitions for the `/animes` resource.

use axum::routing::{get, put};
use axum::Router;

use crate::handlers::anime;
use crate::state::AppState;

/// Routes mounted at `/api/animes`. All require a bearer token.
///
/// ```text
/// GET    /        -> list
/// POST   /        -> create
/// PUT    /{id}    -> update
/// DELETE /{id}    -> delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(anime::list).post(anime::create))
        .route("/{id}", put(anime::update).delete(anime::delete))
}
