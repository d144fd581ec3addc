//! Repository for the `movie_ratings` table (ratings and watch history).

use reelvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::rating::{MovieRating, UpsertRating, WatchHistoryEntry};

/// Column list for `movie_ratings` queries.
const COLUMNS: &str = "id, user_id, movie_id, rating, watched_at, notes, created_at, updated_at";

/// Provides per-user rating operations.
pub struct RatingRepo;

impl RatingRepo {
    /// Insert or replace the caller's rating for a movie.
    pub async fn upsert(pool: &PgPool, input: &UpsertRating) -> Result<MovieRating, sqlx::Error> {
        let query = format!(
            "INSERT INTO movie_ratings (user_id, movie_id, rating, watched_at, notes)
             VALUES ($1, $2, $3, $4, $5)
             ON CONFLICT (user_id, movie_id) DO UPDATE SET
                rating = EXCLUDED.rating,
                watched_at = EXCLUDED.watched_at,
                notes = EXCLUDED.notes
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, MovieRating>(&query)
            .bind(input.user_id)
            .bind(input.movie_id)
            .bind(input.rating)
            .bind(input.watched_at)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find the caller's rating for a movie.
    pub async fn find(
        pool: &PgPool,
        user_id: DbId,
        movie_id: DbId,
    ) -> Result<Option<MovieRating>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM movie_ratings WHERE user_id = $1 AND movie_id = $2");
        sqlx::query_as::<_, MovieRating>(&query)
            .bind(user_id)
            .bind(movie_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete the caller's rating. Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, user_id: DbId, movie_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_ratings WHERE user_id = $1 AND movie_id = $2")
            .bind(user_id)
            .bind(movie_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// A user's watch history: most recently watched first, undated entries last.
    pub async fn history_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<WatchHistoryEntry>, sqlx::Error> {
        sqlx::query_as::<_, WatchHistoryEntry>(
            "SELECT r.movie_id, m.title, m.poster_path, m.release_date, \
                    r.rating, r.watched_at, r.notes, r.updated_at \
             FROM movie_ratings r \
             JOIN movies m ON m.id = r.movie_id \
             WHERE r.user_id = $1 \
             ORDER BY r.watched_at DESC NULLS LAST, r.updated_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }
}
