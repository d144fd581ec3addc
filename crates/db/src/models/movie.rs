//! Shared catalog movie model and DTOs.

use reelvault_core::genre::Genre;
use reelvault_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movie {
    pub id: DbId,
    pub tmdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub title: String,
    pub director: Option<String>,
    pub release_date: Option<Date>,
    pub runtime: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Json<Vec<Genre>>,
    pub vote_average: Option<f64>,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a catalog movie.
#[derive(Debug, Clone, Default)]
pub struct CreateMovie {
    pub tmdb_id: Option<i64>,
    pub imdb_id: Option<String>,
    pub title: String,
    pub director: Option<String>,
    pub release_date: Option<Date>,
    pub runtime: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub created_by: Option<DbId>,
}

/// DTO for updating curated catalog fields. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub director: Option<String>,
    pub release_date: Option<Date>,
    pub runtime: Option<i32>,
    pub overview: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub genres: Option<Vec<Genre>>,
    pub vote_average: Option<f64>,
    pub imdb_id: Option<String>,
}

/// Filters for the catalog listing. Limits are already clamped by the caller.
#[derive(Debug, Clone)]
pub struct MovieQuery {
    /// Case-insensitive title substring.
    pub search: Option<String>,
    /// Normalized tag name the movie must carry.
    pub tag: Option<String>,
    pub limit: i64,
    pub offset: i64,
}
