//! Vault membership rows: denormalized movie snapshots inside a vault.

use reelvault_core::genre::Genre;
use reelvault_core::types::{Date, DbId, Timestamp};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `vault_movies` table.
///
/// `(vault_id, tmdb_id)` is unique (`uq_vault_movies_vault_tmdb`).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VaultMovie {
    pub id: DbId,
    pub vault_id: DbId,
    pub tmdb_id: i64,
    pub title: String,
    pub director: Option<String>,
    pub release_date: Option<Date>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub runtime: Option<i32>,
    pub genres: Json<Vec<Genre>>,
    pub vote_average: Option<f64>,
    pub imdb_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A vault movie annotated with catalog membership.
///
/// `in_collection` is only populated when the caller asked for it.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VaultMovieListItem {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub movie: VaultMovie,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_collection: Option<bool>,
}

/// DTO for inserting a movie into a vault.
#[derive(Debug, Clone)]
pub struct CreateVaultMovie {
    pub vault_id: DbId,
    pub tmdb_id: i64,
    pub title: String,
    pub director: Option<String>,
    pub release_date: Option<Date>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    pub overview: Option<String>,
    pub runtime: Option<i32>,
    pub genres: Vec<Genre>,
    pub vote_average: Option<f64>,
    pub imdb_id: Option<String>,
}
