//! Handlers for account registration, login, and password reset.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};

use animotheque_core::error::CoreError;
use animotheque_db::models::user::CreateUser;
use animotheque_db::repositories::UserRepo;

use crate::auth::jwt::generate_token;
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::response::MessageResponse;
use crate::state::AppState;

/// Generic credential failure message.
///
/// Shared by the unknown-email and wrong-password paths so a caller cannot
/// tell which check failed (user enumeration).
const INVALID_CREDENTIALS: &str = "Invalid email or password";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /api/register`, `POST /api/login`, and
/// `POST /api/reset-password` -- all three take an email + password pair.
///
/// Fields are `Option` so that missing-field validation produces the API's
/// own 400 body instead of a deserialization rejection.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

impl CredentialsRequest {
    /// Extract `(email, password)` when both are present and non-empty.
    fn presence(&self) -> Option<(&str, &str)> {
        match (self.email.as_deref(), self.password.as_deref()) {
            (Some(e), Some(p)) if !e.trim().is_empty() && !p.is_empty() => {
                Some((e.trim(), p))
            }
            _ => None,
        }
    }
}

/// Successful login response.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub token: String,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/register
///
/// Create an account. Returns 400 when email or password is missing,
/// 409 when the email is already taken.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<(StatusCode, Json<MessageResponse>)> {
    // 1. Presence-only validation.
    let (email, password) = input.presence().ok_or_else(|| {
        AppError::Core(CoreError::Validation("Email and password are required".into()))
    })?;

    // 2. Duplicate check (the uq_users_email constraint backstops the race).
    if UserRepo::find_by_email(&state.pool, email).await?.is_some() {
        return Err(AppError::Core(CoreError::Conflict(
            "Email already in use".into(),
        )));
    }

    // 3. Hash and persist.
    let hashed = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let create = CreateUser {
        email: email.to_string(),
        password_hash: hashed,
    };
    let user = UserRepo::create(&state.pool, &create).await?;
    tracing::info!(user_id = user.id, "account created");

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Account created")),
    ))
}

/// POST /api/login
///
/// Authenticate with email + password. Returns a signed bearer token.
/// Unknown email and wrong password produce the same generic 401.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<TokenResponse>> {
    // Missing fields fall through to the same generic failure as a wrong
    // password -- login never reveals what exactly was wrong.
    let Some((email, password)) = input.presence() else {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    };

    // 1. Find user by email.
    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(INVALID_CREDENTIALS.into())))?;

    // 2. Verify password against the stored hash.
    let password_valid = verify_password(password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            INVALID_CREDENTIALS.into(),
        )));
    }

    // 3. Issue a token.
    let token = generate_token(user.id, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(Json(TokenResponse { token }))
}

/// POST /api/reset-password
///
/// Replace the stored hash for an existing account. Requires only knowledge
/// of the email address -- an accepted simplification of this system, not a
/// bug; there is no secondary proof of identity.
pub async fn reset_password(
    State(state): State<AppState>,
    Json(input): Json<CredentialsRequest>,
) -> AppResult<Json<MessageResponse>> {
    let (email, password) = input.presence().ok_or_else(|| {
        AppError::Core(CoreError::Validation(
            "Email and new password are required".into(),
        ))
    })?;

    let user = UserRepo::find_by_email(&state.pool, email)
        .await?
        .ok_or_else(|| AppError::NotFound("No account with this email".into()))?;

    let hashed = hash_password(password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    UserRepo::update_password(&state.pool, user.id, &hashed).await?;
    tracing::info!(user_id = user.id, "password reset");

    Ok(Json(MessageResponse::new("Password reset successfully")))
}
