use crate::types::DbId;

/// Domain-level failures shared by every layer.
///
/// Each variant is a distinct kind; the HTTP layer maps kinds to status
/// codes by matching on the variant, never on the message text.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// The entity does not exist, or exists but is not visible to the caller.
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// A unique key is already taken.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
