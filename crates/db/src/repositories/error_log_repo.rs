//! Repository for the append-only `error_logs` table.

use reelvault_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use super::escape_like;
use crate::models::error_log::{CreateErrorLog, ErrorLog, ErrorLogQuery, ErrorLogWithUser};

/// Column list for `error_logs` SELECT queries, qualified with the `e` alias.
const COLUMNS: &str = "\
    e.id, e.endpoint, e.method, e.status_code, e.error_code, e.message, \
    e.user_id, e.request_id, e.details, e.created_at";

/// Provides insert and filtered query operations for error logs.
pub struct ErrorLogRepo;

impl ErrorLogRepo {
    /// Append an entry, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateErrorLog) -> Result<ErrorLog, sqlx::Error> {
        let query = format!(
            "INSERT INTO error_logs AS e
                (endpoint, method, status_code, error_code, message, user_id, request_id, details)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ErrorLog>(&query)
            .bind(&input.endpoint)
            .bind(&input.method)
            .bind(input.status_code)
            .bind(&input.error_code)
            .bind(&input.message)
            .bind(input.user_id)
            .bind(&input.request_id)
            .bind(input.details.as_ref().map(Json))
            .fetch_one(pool)
            .await
    }

    /// Find a single entry with its user fields.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<ErrorLogWithUser>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}, u.email AS user_email, u.name AS user_name \
             FROM error_logs e LEFT JOIN users u ON u.id = e.user_id \
             WHERE e.id = $1"
        );
        sqlx::query_as::<_, ErrorLogWithUser>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Query entries with filtering and pagination, newest first.
    pub async fn query(
        pool: &PgPool,
        params: &ErrorLogQuery,
    ) -> Result<Vec<ErrorLogWithUser>, sqlx::Error> {
        let (where_clause, bind_values, bind_idx) = build_error_log_filter(params);

        let query = format!(
            "SELECT {COLUMNS}, u.email AS user_email, u.name AS user_name \
             FROM error_logs e LEFT JOIN users u ON u.id = e.user_id \
             {where_clause} \
             ORDER BY e.created_at DESC, e.id DESC \
             LIMIT ${bind_idx} OFFSET ${}",
            bind_idx + 1
        );

        let mut q = sqlx::query_as::<_, ErrorLogWithUser>(&query);
        for value in bind_values {
            q = match value {
                BindValue::Int(v) => q.bind(v),
                BindValue::Text(v) => q.bind(v),
            };
        }
        q.bind(params.limit).bind(params.offset).fetch_all(pool).await
    }

    /// Count entries matching the filter (for pagination metadata).
    pub async fn count(pool: &PgPool, params: &ErrorLogQuery) -> Result<i64, sqlx::Error> {
        let (where_clause, bind_values, _) = build_error_log_filter(params);

        let query = format!("SELECT COUNT(*)::BIGINT AS count FROM error_logs e {where_clause}");

        let mut q = sqlx::query_scalar::<_, i64>(&query);
        for value in bind_values {
            q = match value {
                BindValue::Int(v) => q.bind(v),
                BindValue::Text(v) => q.bind(v),
            };
        }
        q.fetch_one(pool).await
    }
}

// ---------------------------------------------------------------------------
// Internal helpers for dynamic query building
// ---------------------------------------------------------------------------

/// Typed bind value for dynamically-built error log queries.
#[derive(Debug, PartialEq)]
enum BindValue {
    Int(i32),
    Text(String),
}

/// Build a WHERE clause and bind values from [`ErrorLogQuery`] filters.
///
/// Returns `(where_clause, bind_values, next_bind_index)`.
/// The `where_clause` is empty if no filters are active, or starts with `WHERE `.
fn build_error_log_filter(params: &ErrorLogQuery) -> (String, Vec<BindValue>, u32) {
    let mut conditions: Vec<String> = Vec::new();
    let mut bind_idx = 1u32;
    let mut bind_values: Vec<BindValue> = Vec::new();

    if let Some(endpoint) = params.endpoint.as_deref().filter(|e| !e.is_empty()) {
        conditions.push(format!("e.endpoint ILIKE ${bind_idx} ESCAPE '\\'"));
        bind_idx += 1;
        bind_values.push(BindValue::Text(format!("%{}%", escape_like(endpoint))));
    }

    if let Some(status_code) = params.status_code {
        conditions.push(format!("e.status_code = ${bind_idx}"));
        bind_idx += 1;
        bind_values.push(BindValue::Int(status_code));
    }

    let where_clause = if conditions.is_empty() {
        String::new()
    } else {
        format!("WHERE {}", conditions.join(" AND "))
    };

    (where_clause, bind_values, bind_idx)
}
