//! Repository for the `users` table.

use reelvault_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::{UpsertUser, User};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, external_auth_id, email, name, role, created_at, updated_at";

/// Provides the auth get-or-create, listing, and role management for users.
pub struct UserRepo;

impl UserRepo {
    /// Get-or-create the local user for an external identity.
    ///
    /// A single `INSERT .. ON CONFLICT` statement, so concurrent first
    /// requests for the same identity converge on one row. Email and name
    /// are refreshed from the identity; the role is only set on insert.
    /// An unchanged identity writes nothing and is read back instead.
    pub async fn upsert_by_external_id(
        pool: &PgPool,
        input: &UpsertUser,
    ) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (external_auth_id, email, name, role)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (external_auth_id) DO UPDATE SET
                email = EXCLUDED.email,
                name = COALESCE(EXCLUDED.name, users.name)
             WHERE users.email IS DISTINCT FROM EXCLUDED.email
                OR (EXCLUDED.name IS NOT NULL AND users.name IS DISTINCT FROM EXCLUDED.name)
             RETURNING {COLUMNS}"
        );
        let written = sqlx::query_as::<_, User>(&query)
            .bind(&input.external_auth_id)
            .bind(&input.email)
            .bind(&input.name)
            .bind(&input.initial_role)
            .fetch_optional(pool)
            .await?;

        match written {
            Some(user) => Ok(user),
            None => Self::find_by_external_id(pool, &input.external_auth_id)
                .await?
                .ok_or(sqlx::Error::RowNotFound),
        }
    }

    /// Find a user by the identity provider's subject.
    pub async fn find_by_external_id(
        pool: &PgPool,
        external_auth_id: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE external_auth_id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(external_auth_id)
            .fetch_optional(pool)
            .await
    }

    /// List all users ordered by most recently created first.
    pub async fn list(pool: &PgPool) -> Result<Vec<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, User>(&query).fetch_all(pool).await
    }

    /// Change a user's role.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_role(
        pool: &PgPool,
        id: DbId,
        role: &str,
    ) -> Result<Option<User>, sqlx::Error> {
        let query = format!("UPDATE users SET role = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .bind(role)
            .fetch_optional(pool)
            .await
    }
}
