//! Error log entries written by the API error reporter.

use reelvault_core::types::{DbId, Timestamp};
use serde::Serialize;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::FromRow;

/// Structured diagnostic payload stored alongside an entry.
pub type ErrorDetails = Map<String, Value>;

/// A row from the `error_logs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ErrorLog {
    pub id: DbId,
    pub endpoint: String,
    pub method: String,
    pub status_code: i32,
    pub error_code: String,
    pub message: String,
    pub user_id: Option<DbId>,
    pub request_id: Option<String>,
    pub details: Option<Json<ErrorDetails>>,
    pub created_at: Timestamp,
}

/// An entry joined with the few owning-user fields the admin UI shows.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ErrorLogWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub entry: ErrorLog,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

/// DTO for appending an entry.
#[derive(Debug, Clone)]
pub struct CreateErrorLog {
    pub endpoint: String,
    pub method: String,
    pub status_code: i32,
    pub error_code: String,
    pub message: String,
    pub user_id: Option<DbId>,
    pub request_id: Option<String>,
    pub details: Option<ErrorDetails>,
}

/// Conjunctive filter for the admin listing. Limits are already clamped.
#[derive(Debug, Clone, Default)]
pub struct ErrorLogQuery {
    /// Substring the endpoint must contain (case-insensitive).
    pub endpoint: Option<String>,
    /// Exact status code.
    pub status_code: Option<i32>,
    pub limit: i64,
    pub offset: i64,
}
