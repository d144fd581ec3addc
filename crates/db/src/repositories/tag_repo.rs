//! Repository for the `tags` and `movie_tags` tables.

use reelvault_core::tags::normalize_tag_name;
use reelvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::tag::{Tag, TagInfo};

/// Column list for `tags` queries.
const TAG_COLUMNS: &str = "\
    id, name, display_name, usage_count, created_by, created_at, updated_at";

/// Provides tag CRUD and movie-tag associations.
pub struct TagRepo;

impl TagRepo {
    /// Create a tag or return the existing one if the normalized name already exists.
    ///
    /// Uses `ON CONFLICT` for idempotent creation. The `display_name` is updated
    /// on conflict so the most recent casing is preserved.
    pub async fn create_or_get(
        pool: &PgPool,
        display_name: &str,
        created_by: Option<DbId>,
    ) -> Result<Tag, sqlx::Error> {
        let normalized = normalize_tag_name(display_name);
        let query = format!(
            "INSERT INTO tags (name, display_name, created_by) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (name) DO UPDATE SET display_name = EXCLUDED.display_name \
             RETURNING {TAG_COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(&normalized)
            .bind(display_name.trim())
            .bind(created_by)
            .fetch_one(pool)
            .await
    }

    /// List all tags, most used first.
    pub async fn list_all(pool: &PgPool) -> Result<Vec<Tag>, sqlx::Error> {
        let query = format!("SELECT {TAG_COLUMNS} FROM tags ORDER BY usage_count DESC, name");
        sqlx::query_as::<_, Tag>(&query).fetch_all(pool).await
    }

    /// Apply a tag to a movie. Idempotent: does nothing if already applied.
    ///
    /// Increments the tag's `usage_count` only when a new association is created.
    pub async fn apply(
        pool: &PgPool,
        movie_id: DbId,
        tag_id: DbId,
        applied_by: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "INSERT INTO movie_tags (movie_id, tag_id, applied_by) \
             VALUES ($1, $2, $3) \
             ON CONFLICT (movie_id, tag_id) DO NOTHING",
        )
        .bind(movie_id)
        .bind(tag_id)
        .bind(applied_by)
        .execute(pool)
        .await?;

        let was_inserted = result.rows_affected() > 0;

        if was_inserted {
            sqlx::query("UPDATE tags SET usage_count = usage_count + 1 WHERE id = $1")
                .bind(tag_id)
                .execute(pool)
                .await?;
        }

        Ok(was_inserted)
    }

    /// Remove a tag from a movie.
    ///
    /// Decrements the tag's `usage_count` only when an association is actually removed.
    pub async fn remove(pool: &PgPool, movie_id: DbId, tag_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_tags WHERE movie_id = $1 AND tag_id = $2")
            .bind(movie_id)
            .bind(tag_id)
            .execute(pool)
            .await?;

        let was_deleted = result.rows_affected() > 0;

        if was_deleted {
            sqlx::query("UPDATE tags SET usage_count = GREATEST(usage_count - 1, 0) WHERE id = $1")
                .bind(tag_id)
                .execute(pool)
                .await?;
        }

        Ok(was_deleted)
    }

    /// List all tags applied to a movie.
    pub async fn for_movie(pool: &PgPool, movie_id: DbId) -> Result<Vec<TagInfo>, sqlx::Error> {
        sqlx::query_as::<_, TagInfo>(
            "SELECT t.id, t.name, t.display_name \
             FROM movie_tags mt \
             JOIN tags t ON t.id = mt.tag_id \
             WHERE mt.movie_id = $1 \
             ORDER BY t.name",
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await
    }
}
