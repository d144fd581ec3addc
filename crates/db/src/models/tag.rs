//! Tag and movie-tag models.

use reelvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
    pub usage_count: i32,
    pub created_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Lightweight tag info returned when listing the tags of a movie.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TagInfo {
    pub id: DbId,
    pub name: String,
    pub display_name: String,
}
