//! Service-level error classification.
//!
//! Each service operation classifies its own failures into one of the kinds
//! below; the HTTP layer only translates kind to status code.

use crate::db::RepositoryError;

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service failure kinds.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Referenced user or record is absent.
    #[error("{0}")]
    NotFound(String),

    /// Cross-user access to a record.
    #[error("{0}")]
    Forbidden(String),

    /// State conflict: open punch already exists, record already completed,
    /// or a uniqueness violation.
    #[error("{0}")]
    Conflict(String),

    /// Missing or malformed input, or a no-op patch.
    #[error("{0}")]
    BadRequest(String),

    /// Operation requires configuration the user lacks (e.g. punch-out
    /// without a work schedule).
    #[error("{0}")]
    PreconditionFailed(String),

    /// Unexpected internal failure.
    #[error("{0}")]
    Internal(String),

    /// Persistence failure, classified by the HTTP layer via the
    /// repository error's own kind.
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_wraps() {
        let err: ServiceError = RepositoryError::not_found("gone").into();
        match err {
            ServiceError::Repository(inner) => assert!(inner.is_not_found()),
            other => panic!("unexpected variant: {:?}", other),
        }
    }
}
