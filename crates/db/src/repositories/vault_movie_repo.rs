//! Repository for the `vault_movies` table.

use reelvault_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::vault_movie::{CreateVaultMovie, VaultMovie, VaultMovieListItem};

/// Column list for `vault_movies` queries.
const COLUMNS: &str = "\
    id, vault_id, tmdb_id, title, director, release_date, poster_path, \
    backdrop_path, overview, runtime, genres, vote_average, imdb_id, \
    created_at, updated_at";

/// Provides CRUD operations for movies stored inside vaults.
pub struct VaultMovieRepo;

impl VaultMovieRepo {
    /// Insert a movie into a vault, returning the created row.
    ///
    /// Fails with a `uq_vault_movies_vault_tmdb` violation if the vault
    /// already holds the same `tmdb_id`.
    pub async fn create(pool: &PgPool, input: &CreateVaultMovie) -> Result<VaultMovie, sqlx::Error> {
        let query = format!(
            "INSERT INTO vault_movies
                (vault_id, tmdb_id, title, director, release_date, poster_path,
                 backdrop_path, overview, runtime, genres, vote_average, imdb_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, VaultMovie>(&query)
            .bind(input.vault_id)
            .bind(input.tmdb_id)
            .bind(&input.title)
            .bind(&input.director)
            .bind(input.release_date)
            .bind(&input.poster_path)
            .bind(&input.backdrop_path)
            .bind(&input.overview)
            .bind(input.runtime)
            .bind(Json(&input.genres))
            .bind(input.vote_average)
            .bind(&input.imdb_id)
            .fetch_one(pool)
            .await
    }

    /// Find the row for `(vault_id, tmdb_id)`, if any.
    pub async fn find_by_vault_and_tmdb(
        pool: &PgPool,
        vault_id: DbId,
        tmdb_id: i64,
    ) -> Result<Option<VaultMovie>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM vault_movies WHERE vault_id = $1 AND tmdb_id = $2");
        sqlx::query_as::<_, VaultMovie>(&query)
            .bind(vault_id)
            .bind(tmdb_id)
            .fetch_optional(pool)
            .await
    }

    /// List a vault's movies, most recently added first.
    ///
    /// With `collection_owner`, each row carries whether that user has the
    /// movie in their own collection: a catalog movie with the same
    /// `tmdb_id` that they added, rated, or logged as watched.
    pub async fn list_for_vault(
        pool: &PgPool,
        vault_id: DbId,
        collection_owner: Option<DbId>,
    ) -> Result<Vec<VaultMovieListItem>, sqlx::Error> {
        let status_column = if collection_owner.is_some() {
            "EXISTS (
                SELECT 1 FROM movies m
                WHERE m.tmdb_id = vault_movies.tmdb_id
                  AND (m.created_by = $2
                       OR EXISTS (SELECT 1 FROM movie_ratings r
                                  WHERE r.movie_id = m.id AND r.user_id = $2))
             )"
        } else {
            "NULL::BOOLEAN"
        };
        let query = format!(
            "SELECT {COLUMNS}, {status_column} AS in_collection
             FROM vault_movies
             WHERE vault_id = $1
             ORDER BY created_at DESC, id DESC"
        );
        let mut q = sqlx::query_as::<_, VaultMovieListItem>(&query).bind(vault_id);
        if let Some(user_id) = collection_owner {
            q = q.bind(user_id);
        }
        q.fetch_all(pool).await
    }

    /// Delete a movie from a vault owned by `user_id`.
    ///
    /// Ownership is checked in the same statement. Returns `true` if a row
    /// was deleted.
    pub async fn delete_owned(
        pool: &PgPool,
        id: DbId,
        vault_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM vault_movies vm
             USING vaults v
             WHERE vm.id = $1 AND vm.vault_id = $2
               AND v.id = vm.vault_id AND v.user_id = $3",
        )
        .bind(id)
        .bind(vault_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
