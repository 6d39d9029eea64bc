//! Client-side sync logic for the Animotheque API.
//!
//! The pieces a front-end needs between the user and the HTTP API:
//!
//! - [`api`] -- typed client for the server's JSON endpoints, carrying the
//!   bearer token and surfacing auth expiry distinctly.
//! - [`state`] -- the owned UI state object: list cache, dialog guard, sort
//!   state, and the season-field state machine.
//! - [`sort`] -- the three table comparators and the column/direction
//!   toggle logic.
//! - [`lookup`] -- pluggable title metadata lookup: a static season table
//!   first, an external search service as fallback, plus the search
//!   debounce policy.
//!
//! Rendering is out of scope; everything here is plain data in, plain data
//! out.

pub mod api;
pub mod lookup;
pub mod sort;
pub mod state;

pub use api::{AnimePayload, AnimeRecord, ApiClient, ClientError};
pub use lookup::{LookupChain, LookupResult, LookupUnavailable, MetadataProvider};
pub use sort::{SortColumn, SortDirection, SortState};
pub use state::{SeasonField, UiState};
