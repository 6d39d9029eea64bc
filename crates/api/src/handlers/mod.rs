//! Request handlers.
//!
//! Each submodule provides async handler functions for one resource.
//! Handlers validate request bodies (presence of required fields only),
//! delegate to the corresponding repository in `animotheque_db`, and map
//! store outcomes into status codes via [`AppError`](crate::error::AppError).

pub mod anime;
pub mod auth;
