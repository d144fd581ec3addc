//! TMDB movie-metadata client.
//!
//! Wraps the TMDB v3 REST API behind the [`TmdbApi`] trait so the HTTP
//! layer can be exercised against a stub. Also owns the query-side logic
//! that sits on top of the raw endpoints: identifier extraction, the
//! year-aware enhanced search, and the direct-id-then-text fallback chain.

pub mod client;
pub mod enhanced;
pub mod error;
pub mod id;
pub mod search;
pub mod types;

pub use client::{TmdbApi, TmdbClient, DEFAULT_BASE_URL};
pub use error::TmdbError;
pub use search::{search_movies, SearchMethod, SearchOutcome};
