//! Repository for the `vaults` table.
//!
//! Every lookup and mutation is scoped by `user_id` in the same statement,
//! so a vault owned by someone else is indistinguishable from a missing one.

use reelvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::vault::{CreateVault, UpdateVault, Vault, VaultSummary};

/// Column list for `vaults` queries.
const COLUMNS: &str = "id, user_id, name, description, created_at, updated_at";

/// Number of poster paths included in a vault summary.
const POSTER_PREVIEW_COUNT: i64 = 4;

/// Summary projection over `vaults v`; `$1` must bind [`POSTER_PREVIEW_COUNT`].
const SUMMARY_SELECT: &str = "\
    SELECT v.id, v.user_id, v.name, v.description, v.created_at, v.updated_at, \
        (SELECT COUNT(*) FROM vault_movies vm WHERE vm.vault_id = v.id) AS movie_count, \
        ARRAY( \
            SELECT vm.poster_path FROM vault_movies vm \
            WHERE vm.vault_id = v.id AND vm.poster_path IS NOT NULL \
            ORDER BY vm.created_at DESC, vm.id DESC \
            LIMIT $1 \
        ) AS poster_previews \
    FROM vaults v";

/// Provides owner-scoped CRUD operations for vaults.
pub struct VaultRepo;

impl VaultRepo {
    /// Insert a new vault, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateVault) -> Result<Vault, sqlx::Error> {
        let query = format!(
            "INSERT INTO vaults (user_id, name, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vault>(&query)
            .bind(input.user_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_one(pool)
            .await
    }

    /// Find a vault that exists AND belongs to `user_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<Vault>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM vaults WHERE id = $1 AND user_id = $2");
        sqlx::query_as::<_, Vault>(&query)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Owned vault with movie count and poster previews.
    pub async fn find_owned_summary(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
    ) -> Result<Option<VaultSummary>, sqlx::Error> {
        let query = format!("{SUMMARY_SELECT} WHERE v.id = $2 AND v.user_id = $3");
        sqlx::query_as::<_, VaultSummary>(&query)
            .bind(POSTER_PREVIEW_COUNT)
            .bind(id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's vaults, most recently updated first.
    pub async fn list_for_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<VaultSummary>, sqlx::Error> {
        let query = format!(
            "{SUMMARY_SELECT} WHERE v.user_id = $2 ORDER BY v.updated_at DESC, v.id DESC"
        );
        sqlx::query_as::<_, VaultSummary>(&query)
            .bind(POSTER_PREVIEW_COUNT)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Update an owned vault. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if the vault does not exist or is not owned by `user_id`.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        user_id: DbId,
        input: &UpdateVault,
    ) -> Result<Option<Vault>, sqlx::Error> {
        let query = format!(
            "UPDATE vaults SET
                name = COALESCE($3, name),
                description = COALESCE($4, description)
             WHERE id = $1 AND user_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Vault>(&query)
            .bind(id)
            .bind(user_id)
            .bind(&input.name)
            .bind(&input.description)
            .fetch_optional(pool)
            .await
    }

    /// Delete an owned vault. Its movies go with it (`ON DELETE CASCADE`).
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete_owned(pool: &PgPool, id: DbId, user_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM vaults WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Bump `updated_at` after the vault's contents change.
    pub async fn touch(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE vaults SET updated_at = NOW() WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(())
    }
}
