//! Oscar nomination metadata attached to catalog movies.

use reelvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `oscar_nominations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OscarNomination {
    pub id: DbId,
    pub movie_id: DbId,
    pub ceremony_year: i32,
    pub category: String,
    pub nominee: Option<String>,
    pub is_winner: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a nomination.
#[derive(Debug, Clone)]
pub struct CreateOscarNomination {
    pub movie_id: DbId,
    pub ceremony_year: i32,
    pub category: String,
    pub nominee: Option<String>,
    pub is_winner: bool,
}
