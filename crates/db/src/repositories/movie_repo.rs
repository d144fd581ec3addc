//! Repository for the shared `movies` catalog.

use reelvault_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::escape_like;
use crate::models::movie::{CreateMovie, Movie, MovieQuery, UpdateMovie};

/// Column list for `movies` queries, qualified with the `m` alias.
const COLUMNS: &str = "\
    m.id, m.tmdb_id, m.imdb_id, m.title, m.director, m.release_date, m.runtime, \
    m.overview, m.poster_path, m.backdrop_path, m.genres, m.vote_average, \
    m.created_by, m.created_at, m.updated_at";

/// Provides CRUD and filtered listing for catalog movies.
pub struct MovieRepo;

impl MovieRepo {
    /// Insert a catalog movie, returning the created row.
    ///
    /// Fails with a `uq_movies_tmdb_id` violation when `tmdb_id` is taken.
    pub async fn create(pool: &PgPool, input: &CreateMovie) -> Result<Movie, sqlx::Error> {
        let query = format!(
            "INSERT INTO movies AS m
                (tmdb_id, imdb_id, title, director, release_date, runtime, overview,
                 poster_path, backdrop_path, genres, vote_average, created_by)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(input.tmdb_id)
            .bind(&input.imdb_id)
            .bind(&input.title)
            .bind(&input.director)
            .bind(input.release_date)
            .bind(input.runtime)
            .bind(&input.overview)
            .bind(&input.poster_path)
            .bind(&input.backdrop_path)
            .bind(Json(&input.genres))
            .bind(input.vote_average)
            .bind(input.created_by)
            .fetch_one(pool)
            .await
    }

    /// Find a movie by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies m WHERE m.id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a movie by its TMDB identifier.
    pub async fn find_by_tmdb_id(
        pool: &PgPool,
        tmdb_id: i64,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies m WHERE m.tmdb_id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(tmdb_id)
            .fetch_optional(pool)
            .await
    }

    /// List movies matching the filter, newest first.
    pub async fn list(pool: &PgPool, params: &MovieQuery) -> Result<Vec<Movie>, sqlx::Error> {
        let (where_clause, binds, bind_idx) = build_movie_filter(params);
        let query = format!(
            "SELECT {COLUMNS} FROM movies m {where_clause} \
             ORDER BY m.created_at DESC, m.id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, Movie>(&query);
        for value in binds {
            q = q.bind(value);
        }
        q.bind(params.limit).bind(params.offset).fetch_all(pool).await
    }

    /// Count movies matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &MovieQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, binds, _) = build_movie_filter(params);
        let query = format!("SELECT COUNT(*)::BIGINT FROM movies m {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in binds {
            q = q.bind(value);
        }
        q.fetch_one(pool).await
    }

    /// Update curated fields. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateMovie,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!(
            "UPDATE movies AS m SET
                title = COALESCE($2, m.title),
                director = COALESCE($3, m.director),
                release_date = COALESCE($4, m.release_date),
                runtime = COALESCE($5, m.runtime),
                overview = COALESCE($6, m.overview),
                poster_path = COALESCE($7, m.poster_path),
                backdrop_path = COALESCE($8, m.backdrop_path),
                genres = COALESCE($9, m.genres),
                vote_average = COALESCE($10, m.vote_average),
                imdb_id = COALESCE($11, m.imdb_id)
             WHERE m.id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.director)
            .bind(input.release_date)
            .bind(input.runtime)
            .bind(&input.overview)
            .bind(&input.poster_path)
            .bind(&input.backdrop_path)
            .bind(input.genres.as_ref().map(Json))
            .bind(input.vote_average)
            .bind(&input.imdb_id)
            .fetch_optional(pool)
            .await
    }

    /// Delete a movie. Tags, ratings, and nominations cascade.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Build a WHERE clause and text bind values from [`MovieQuery`] filters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`. The clause is
/// empty when no filter is active.
fn build_movie_filter(params: &MovieQuery) -> (String, Vec<String>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut binds: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;

    if let Some(search) = params.search.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        conditions.push(format!("m.title ILIKE ${bind_idx} ESCAPE '\\'"));
        bind_idx += 1;
        binds.push(format!("%{}%", escape_like(search)));
    }

    if let Some(tag) = params.tag.as_deref().filter(|t| !t.is_empty()) {
        conditions.push(format!(
            "EXISTS (SELECT 1 FROM movie_tags mt JOIN tags t ON t.id = mt.tag_id \
             WHERE mt.movie_id = m.id AND t.name = ${bind_idx})"
        ));
        bind_idx += 1;
        binds.push(tag.to_string());
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, binds, bind_idx)
}
