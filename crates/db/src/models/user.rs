//! User entity model and DTOs.

use reelvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Full user row from the `users` table.
///
/// `external_auth_id` links the row to the identity provider and never
/// changes after insertion.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct User {
    pub id: DbId,
    pub external_auth_id: String,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for the get-or-create performed on every authenticated request.
#[derive(Debug, Clone)]
pub struct UpsertUser {
    pub external_auth_id: String,
    pub email: String,
    pub name: Option<String>,
    /// Role assigned only when the row is created; ignored on conflict.
    pub initial_role: String,
}
