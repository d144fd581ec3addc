//! Per-user ratings and watch history.

use reelvault_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `movie_ratings` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovieRating {
    pub id: DbId,
    pub user_id: DbId,
    pub movie_id: DbId,
    pub rating: Option<f64>,
    pub watched_at: Option<Date>,
    pub notes: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for setting the caller's rating of a movie (insert or replace).
#[derive(Debug, Clone)]
pub struct UpsertRating {
    pub user_id: DbId,
    pub movie_id: DbId,
    pub rating: Option<f64>,
    pub watched_at: Option<Date>,
    pub notes: Option<String>,
}

/// One entry of a user's watch history, joined with the movie basics.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct WatchHistoryEntry {
    pub movie_id: DbId,
    pub title: String,
    pub poster_path: Option<String>,
    pub release_date: Option<Date>,
    pub rating: Option<f64>,
    pub watched_at: Option<Date>,
    pub notes: Option<String>,
    pub updated_at: Timestamp,
}
