//! HTTP-level integration tests for the owner-scoped anime library.
//!
//! Covers the create -> list round-trip, title validation, full-replace
//! update semantics, idempotent delete, and cross-user isolation.

mod common;

use axum::http::StatusCode;
use axum::Router;
use common::{body_json, delete_auth, get_auth, post_json, post_json_auth, put_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Register an account through the API and return a login token for it.
async fn register_and_login(app: Router, email: &str) -> String {
    let body = serde_json::json!({ "email": email, "password": "test_password_123" });
    let response = post_json(app.clone(), "/api/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = serde_json::json!({ "email": email, "password": "test_password_123" });
    let response = post_json(app, "/api/login", body).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Create / list
// ---------------------------------------------------------------------------

/// An entry created with given fields appears in a subsequent list call
/// with identical field values plus an assigned id.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_then_list_round_trip(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(app.clone(), "library@x.com").await;

    let body = serde_json::json!({
        "title": "Vinland Saga",
        "lastEpisode": "Season 2",
        "episode": 24,
        "watchDate": "2023-06-15",
        "status": "fini",
        "image": "https://cdn.example/vinland.jpg"
    });
    let response = post_json_auth(app.clone(), "/api/animes", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert!(created["id"].is_number(), "created entry must carry an id");
    assert_eq!(created["title"], "Vinland Saga");

    let response = get_auth(app, "/api/animes", &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    let list = json.as_array().expect("list response must be an array");
    assert_eq!(list.len(), 1);

    let entry = &list[0];
    assert_eq!(entry["id"], created["id"]);
    assert_eq!(entry["title"], "Vinland Saga");
    assert_eq!(entry["lastEpisode"], "Season 2");
    assert_eq!(entry["episode"], 24);
    assert_eq!(entry["watchDate"], "2023-06-15");
    assert_eq!(entry["status"], "fini");
    assert_eq!(entry["image"], "https://cdn.example/vinland.jpg");
}

/// Creating without a title (or with a blank one) returns 400.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_create_requires_title(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(app.clone(), "notitle@x.com").await;

    let body = serde_json::json!({ "status": "fini" });
    let response = post_json_auth(app.clone(), "/api/animes", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = serde_json::json!({ "title": "   " });
    let response = post_json_auth(app, "/api/animes", body, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

/// Status and watchDate are stored as free text, unvalidated.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_status_and_date_are_not_validated(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(app.clone(), "freetext@x.com").await;

    let body = serde_json::json!({
        "title": "Some Show",
        "watchDate": "not a date at all",
        "status": "definitely-not-in-the-enum"
    });
    let response = post_json_auth(app, "/api/animes", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    assert_eq!(created["watchDate"], "not a date at all");
    assert_eq!(created["status"], "definitely-not-in-the-enum");
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

/// PUT is a full replace: supplied fields overwrite, omitted fields clear,
/// and id/owner are untouched.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_is_full_replace(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(app.clone(), "replace@x.com").await;

    let body = serde_json::json!({
        "title": "Dr. Stone",
        "lastEpisode": "Season 1",
        "episode": 10,
        "watchDate": "2024-01-01",
        "status": "fini"
    });
    let response = post_json_auth(app.clone(), "/api/animes", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    // Replace with a body that omits episode and watchDate.
    let body = serde_json::json!({
        "title": "Dr. Stone",
        "lastEpisode": "Season 2",
        "status": "saison à venir",
        "sortie": "2025"
    });
    let response = put_json_auth(app.clone(), &format!("/api/animes/{id}"), body, &token).await;
    assert_eq!(response.status(), StatusCode::OK);

    let updated = body_json(response).await;
    assert_eq!(updated["id"], id, "id must be unchanged");
    assert_eq!(updated["userId"], created["userId"], "owner must be unchanged");
    assert_eq!(updated["lastEpisode"], "Season 2");
    assert_eq!(updated["status"], "saison à venir");
    assert_eq!(updated["sortie"], "2025");
    assert!(updated["episode"].is_null(), "omitted field must be cleared");
    assert!(
        updated["watchDate"].is_null(),
        "omitted field must be cleared"
    );
}

/// Updating a nonexistent id returns 404.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_update_unknown_id_returns_404(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(app.clone(), "ghostupdate@x.com").await;

    let body = serde_json::json!({ "title": "Ghost" });
    let response = put_json_auth(app, "/api/animes/999999", body, &token).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

/// The concrete scenario: create Naruto, see it listed, delete it, see it
/// gone, delete it again -- both deletes succeed.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_delete_is_idempotent(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(app.clone(), "naruto@x.com").await;

    let body = serde_json::json!({ "title": "Naruto", "status": "fini" });
    let response = post_json_auth(app.clone(), "/api/animes", body, &token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    let response = get_auth(app.clone(), "/api/animes", &token).await;
    let json = body_json(response).await;
    assert!(
        json.as_array().unwrap().iter().any(|e| e["id"] == id),
        "list must contain the created entry"
    );

    let response = delete_auth(app.clone(), &format!("/api/animes/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["message"].is_string());

    let response = get_auth(app.clone(), "/api/animes", &token).await;
    let json = body_json(response).await;
    assert!(
        !json.as_array().unwrap().iter().any(|e| e["id"] == id),
        "deleted entry must not be listed"
    );

    // Second delete of the same id is still a success.
    let response = delete_auth(app, &format!("/api/animes/{id}"), &token).await;
    assert_eq!(response.status(), StatusCode::OK);
}

// ---------------------------------------------------------------------------
// Owner isolation
// ---------------------------------------------------------------------------

/// Entries created by one user never appear in another's list, and foreign
/// update/delete attempts return 404 / no-op without mutating anything.
#[sqlx::test(migrations = "../db/migrations")]
async fn test_owner_isolation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token_a = register_and_login(app.clone(), "owner-a@x.com").await;
    let token_b = register_and_login(app.clone(), "owner-b@x.com").await;

    let body = serde_json::json!({ "title": "Mob Psycho 100", "status": "fini" });
    let response = post_json_auth(app.clone(), "/api/animes", body, &token_a).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let created = body_json(response).await;
    let id = created["id"].as_i64().unwrap();

    // B's list does not contain A's entry.
    let response = get_auth(app.clone(), "/api/animes", &token_b).await;
    let json = body_json(response).await;
    assert!(
        json.as_array().unwrap().is_empty(),
        "another user's list must be empty"
    );

    // B's update attempt against A's id: 404, nothing leaked, nothing changed.
    let body = serde_json::json!({ "title": "Hijacked" });
    let response = put_json_auth(app.clone(), &format!("/api/animes/{id}"), body, &token_b).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // B's delete attempt: no-op success.
    let response = delete_auth(app.clone(), &format!("/api/animes/{id}"), &token_b).await;
    assert_eq!(response.status(), StatusCode::OK);

    // A still owns the unmodified entry.
    let response = get_auth(app, "/api/animes", &token_a).await;
    let json = body_json(response).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 1, "A's entry must survive B's attempts");
    assert_eq!(list[0]["id"], id);
    assert_eq!(list[0]["title"], "Mob Psycho 100");
}
