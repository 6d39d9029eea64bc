pub mod anime;
pub mod auth;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /test                 liveness message (public)
///
/// /register             create account (public)
/// /login                obtain bearer token (public)
/// /reset-password       replace password by email (public)
///
/// /animes               list, create (requires auth)
/// /animes/{id}          update, delete (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Liveness probe at /api/test.
        .merge(health::api_router())
        // Account routes (register, login, reset-password).
        .merge(auth::router())
        // Per-user anime library.
        .nest("/animes", anime::router())
}
