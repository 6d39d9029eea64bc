//! Typed HTTP client for the Animotheque API.
//!
//! Thin wrapper over `reqwest` that owns the base URL and the bearer token.
//! 401/403 responses surface as [`ClientError::AuthExpired`] so callers can
//! drop the stored token and send the user back to login; every other error
//! response carries the server's `{"message": ...}` body.

use serde::{Deserialize, Serialize};

/// Errors surfaced by [`ApiClient`] calls.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The server rejected the token (401/403). Drop the stored token and
    /// re-authenticate.
    #[error("authentication expired")]
    AuthExpired,

    /// A non-auth error response; `message` is the server's error body.
    #[error("{message}")]
    Api { status: u16, message: String },

    /// Transport-level failure (connect, timeout, body read).
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
}

/// One anime entry as returned by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimeRecord {
    pub id: i64,
    pub title: String,
    pub last_episode: Option<String>,
    pub episode: Option<i32>,
    pub watch_date: Option<String>,
    pub status: Option<String>,
    pub sortie: Option<String>,
    pub image: Option<String>,
}

/// Request body for add and update (full replace).
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnimePayload {
    pub title: String,
    pub last_episode: Option<String>,
    pub episode: Option<i32>,
    pub watch_date: Option<String>,
    pub status: Option<String>,
    pub sortie: Option<String>,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize)]
struct MessageBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct TokenBody {
    token: String,
}

/// Typed client for the server's JSON endpoints.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: reqwest::Client,
}

impl ApiClient {
    /// Create a client against `base_url` (e.g. `http://localhost:5000`),
    /// with no token yet.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            token: None,
            http: reqwest::Client::new(),
        }
    }

    /// The currently stored bearer token, if any.
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Replace the stored token (e.g. restored from local storage), or clear
    /// it with `None`.
    pub fn set_token(&mut self, token: Option<String>) {
        self.token = token;
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path.trim_start_matches('/'))
    }

    fn authorized(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", format!("Bearer {token}")),
            None => builder,
        }
    }

    /// POST /api/register
    pub async fn register(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/api/register"))
            .json(&body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// POST /api/login -- stores the returned token on success.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/api/login"))
            .json(&body)
            .send()
            .await?;
        let response = check(response).await?;
        let token: TokenBody = response.json().await?;
        self.token = Some(token.token);
        Ok(())
    }

    /// POST /api/reset-password
    pub async fn reset_password(&self, email: &str, password: &str) -> Result<(), ClientError> {
        let body = serde_json::json!({ "email": email, "password": password });
        let response = self
            .http
            .post(self.url("/api/reset-password"))
            .json(&body)
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }

    /// GET /api/animes
    pub async fn list(&self) -> Result<Vec<AnimeRecord>, ClientError> {
        let response = self
            .authorized(self.http.get(self.url("/api/animes")))
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// POST /api/animes
    pub async fn add(&self, payload: &AnimePayload) -> Result<AnimeRecord, ClientError> {
        let response = self
            .authorized(self.http.post(self.url("/api/animes")))
            .json(payload)
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// PUT /api/animes/{id} (full replace)
    pub async fn update(&self, id: i64, payload: &AnimePayload) -> Result<AnimeRecord, ClientError> {
        let response = self
            .authorized(self.http.put(self.url(&format!("/api/animes/{id}"))))
            .json(payload)
            .send()
            .await?;
        let response = check(response).await?;
        Ok(response.json().await?)
    }

    /// DELETE /api/animes/{id} -- idempotent on the server side.
    pub async fn delete(&self, id: i64) -> Result<(), ClientError> {
        let response = self
            .authorized(self.http.delete(self.url(&format!("/api/animes/{id}"))))
            .send()
            .await?;
        check(response).await?;
        Ok(())
    }
}

/// Map an error response to [`ClientError`], passing successes through.
async fn check(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    if status.as_u16() == 401 || status.as_u16() == 403 {
        return Err(ClientError::AuthExpired);
    }
    let message = response
        .json::<MessageBody>()
        .await
        .map(|b| b.message)
        .unwrap_or_else(|_| status.to_string());
    Err(ClientError::Api {
        status: status.as_u16(),
        message,
    })
}
