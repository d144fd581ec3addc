//! Repository for the `oscar_nominations` table.

use reelvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::oscar::{CreateOscarNomination, OscarNomination};

/// Column list for `oscar_nominations` queries.
const COLUMNS: &str =
    "id, movie_id, ceremony_year, category, nominee, is_winner, created_at, updated_at";

/// Provides read and insert operations for Oscar nominations.
pub struct OscarRepo;

impl OscarRepo {
    /// Record a nomination, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &CreateOscarNomination,
    ) -> Result<OscarNomination, sqlx::Error> {
        let query = format!(
            "INSERT INTO oscar_nominations (movie_id, ceremony_year, category, nominee, is_winner)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, OscarNomination>(&query)
            .bind(input.movie_id)
            .bind(input.ceremony_year)
            .bind(&input.category)
            .bind(&input.nominee)
            .bind(input.is_winner)
            .fetch_one(pool)
            .await
    }

    /// List a movie's nominations: newest ceremony first, wins before losses.
    pub async fn list_for_movie(
        pool: &PgPool,
        movie_id: DbId,
    ) -> Result<Vec<OscarNomination>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM oscar_nominations WHERE movie_id = $1 \
             ORDER BY ceremony_year DESC, is_winner DESC, category"
        );
        sqlx::query_as::<_, OscarNomination>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }
}
