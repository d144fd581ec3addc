//! Vault models and DTOs.

use reelvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `vaults` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Vault {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A vault with its movie count and a few poster paths for previews.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct VaultSummary {
    pub id: DbId,
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
    pub movie_count: i64,
    /// Posters of the most recently added movies (at most four).
    pub poster_previews: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a vault.
#[derive(Debug, Clone)]
pub struct CreateVault {
    pub user_id: DbId,
    pub name: String,
    pub description: Option<String>,
}

/// DTO for updating a vault. `None` leaves the column unchanged.
#[derive(Debug, Clone, Default)]
pub struct UpdateVault {
    pub name: Option<String>,
    pub description: Option<String>,
}
