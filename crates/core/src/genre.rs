//! Typed genre document stored in `genres` JSONB columns.

use serde::{Deserialize, Serialize};

/// A single genre as reported by the metadata provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}
