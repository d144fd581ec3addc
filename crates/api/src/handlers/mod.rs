//! Request handlers, one module per resource.

pub mod admin;
pub mod me;
pub mod movies;
pub mod ratings;
pub mod tags;
pub mod tmdb;
pub mod vaults;

use reelvault_core::error::CoreError;
use reelvault_core::types::DbId;
use reelvault_core::validation::validation_error;
use validator::Validate;

use crate::error::AppError;

/// Parse a path segment as a positive database id.
///
/// Path ids arrive as strings so a malformed value surfaces as a
/// `VALIDATION_ERROR` in the standard envelope instead of axum's plain-text
/// rejection.
pub(crate) fn parse_id(raw: &str, name: &str) -> Result<DbId, AppError> {
    raw.trim()
        .parse::<DbId>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| AppError::Core(CoreError::Validation(format!("Invalid {name}: '{raw}'"))))
}

/// Run `validator` rules on a request body.
pub(crate) fn validate_body<T: Validate>(input: &T) -> Result<(), AppError> {
    input
        .validate()
        .map_err(|e| AppError::Core(validation_error(&e)))
}

/// Trim an optional string, mapping blank to `None`.
pub(crate) fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
