//! Release-date parsing.
//!
//! Clients send dates as ISO strings, sometimes as full timestamps copied
//! from upstream payloads. Only the calendar date is kept, read verbatim
//! from the string, so `"2010-07-16T23:30:00-05:00"` stays July 16th.

use chrono::NaiveDate;

use crate::error::CoreError;

/// Parse an optional release-date string.
///
/// - `None`, `""`, and whitespace-only strings yield `Ok(None)`.
/// - `YYYY-MM-DD` is parsed directly.
/// - Longer strings are accepted when their first ten characters form a
///   valid date followed by a `T` or space (RFC 3339 / SQL timestamp).
pub fn parse_release_date(raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    parse_date_field("release_date", raw)
}

/// Same rules as [`parse_release_date`] for any date field, naming `field`
/// in the validation message.
pub fn parse_date_field(field: &str, raw: Option<&str>) -> Result<Option<NaiveDate>, CoreError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(None);
    };

    let date_part = match raw.get(..10) {
        Some(prefix) if raw.len() == 10 => prefix,
        Some(prefix) if matches!(raw.as_bytes().get(10), Some(b'T' | b't' | b' ')) => prefix,
        _ => return Err(invalid(field, raw)),
    };

    NaiveDate::parse_from_str(date_part, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| invalid(field, raw))
}

fn invalid(field: &str, raw: &str) -> CoreError {
    CoreError::Validation(format!(
        "{field} must be an ISO date (YYYY-MM-DD), got '{raw}'"
    ))
}
