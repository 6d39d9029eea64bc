//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Repositories are dumb data
//! mappers: no business logic, no cross-repository calls, explicit SQL only.

pub mod anime_repo;
pub mod user_repo;

pub use anime_repo::AnimeRepo;
pub use user_repo::UserRepo;
