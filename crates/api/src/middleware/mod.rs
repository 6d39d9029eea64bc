//! Authentication middleware extractors.
//!
//! - [`auth::AuthUser`] -- extracts the authenticated user from a bearer token.

pub mod auth;
