//! Pagination defaults and clamping helpers.
//!
//! Every paginated listing clamps user-supplied `limit` / `offset` through
//! these helpers so the database never sees an unbounded read.

use serde::Serialize;

/// Default page size for the admin error-log listing.
pub const DEFAULT_ERROR_LOG_LIMIT: i64 = 50;

/// Maximum page size for the admin error-log listing.
pub const MAX_ERROR_LOG_LIMIT: i64 = 200;

/// Default page size for the movie catalog listing.
pub const DEFAULT_MOVIE_LIMIT: i64 = 20;

/// Maximum page size for the movie catalog listing.
pub const MAX_MOVIE_LIMIT: i64 = 100;

/// Clamp a user-provided limit to `[1, max]`, falling back to `default`.
pub fn clamp_limit(limit: Option<i64>, default: i64, max: i64) -> i64 {
    limit.unwrap_or(default).max(1).min(max)
}

/// Clamp a user-provided offset to non-negative.
pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub total: i64,
    pub limit: i64,
    pub offset: i64,
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

impl PageInfo {
    /// Build page metadata; `has_more` is true iff `offset + limit < total`.
    pub fn new(total: i64, limit: i64, offset: i64) -> Self {
        Self {
            total,
            limit,
            offset,
            has_more: offset.saturating_add(limit) < total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_limit_uses_default_when_none() {
        assert_eq!(clamp_limit(None, 50, 200), 50);
    }

    #[test]
    fn clamp_limit_respects_max() {
        assert_eq!(clamp_limit(Some(10_000), 50, 200), 200);
    }

    #[test]
    fn clamp_limit_floors_at_one() {
        assert_eq!(clamp_limit(Some(0), 50, 200), 1);
        assert_eq!(clamp_limit(Some(-3), 50, 200), 1);
    }

    #[test]
    fn clamp_offset_floors_at_zero() {
        assert_eq!(clamp_offset(None), 0);
        assert_eq!(clamp_offset(Some(-10)), 0);
        assert_eq!(clamp_offset(Some(40)), 40);
    }

    #[test]
    fn has_more_when_page_ends_before_total() {
        let page = PageInfo::new(120, 50, 50);
        assert!(page.has_more);
    }

    #[test]
    fn no_more_when_page_reaches_total() {
        assert!(!PageInfo::new(100, 50, 50).has_more);
        assert!(!PageInfo::new(0, 50, 0).has_more);
        assert!(!PageInfo::new(10, 50, 0).has_more);
    }

    #[test]
    fn page_info_serializes_has_more_in_camel_case() {
        let json = serde_json::to_value(PageInfo::new(3, 1, 0)).unwrap();
        assert_eq!(json["hasMore"], true);
        assert_eq!(json["total"], 3);
    }
}
