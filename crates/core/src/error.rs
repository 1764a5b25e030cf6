use crate::types::DbId;

/// Domain error kinds shared across the workspace.
///
/// Mutating operations return these rather than panicking or throwing
/// opaque strings across the API boundary; the HTTP layer maps each
/// variant to a status code.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Optimistic-concurrency check failed; the caller should re-read
    /// current state before retrying.
    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
