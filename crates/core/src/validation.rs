//! Field limits and `validator` glue.

use validator::ValidationErrors;

use crate::error::CoreError;

/// Maximum vault name length (after trimming).
pub const MAX_VAULT_NAME_LEN: u64 = 100;

/// Maximum vault description length.
pub const MAX_VAULT_DESCRIPTION_LEN: u64 = 1000;

/// Maximum movie title length.
pub const MAX_TITLE_LEN: u64 = 500;

/// Flatten `validator` errors into a single [`CoreError::Validation`].
///
/// Field names are sorted so the message is stable across runs.
pub fn validation_error(errors: &ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, errs)| {
            let detail = errs
                .iter()
                .filter_map(|e| e.message.as_ref().map(ToString::to_string))
                .next()
                .unwrap_or_else(|| "is invalid".to_string());
            format!("{field} {detail}")
        })
        .collect();
    messages.sort();
    CoreError::Validation(messages.join("; "))
}
