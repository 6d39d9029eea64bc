//! Shared response envelope types for API handlers.
//!
//! Status-only endpoints (register, reset-password, delete, liveness) all
//! answer with a `{ "message": ... }` body. Use [`MessageResponse`] instead
//! of ad-hoc `serde_json::json!({ "message": ... })` to get compile-time
//! type safety and consistent serialization.

use serde::Serialize;

/// Standard `{ "message": string }` response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
