/// Core error types for Userhub
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Error kinds visible across crate boundaries.
///
/// Storage implementations translate driver-specific failures into these
/// variants so callers never inspect driver error values directly.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity that was looked up
        entity: String,
        /// Identifier that matched nothing
        id: String,
    },

    /// Storage-related errors (connectivity, query failures)
    #[error("Storage error: {0}")]
    Storage(String),
}

impl CoreError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create a storage error
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::Storage(msg.into())
    }

    /// Whether this error is the not-found condition
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_is_distinct_from_storage_errors() {
        assert!(CoreError::not_found("user", "42").is_not_found());
        assert!(!CoreError::storage("connection refused").is_not_found());
    }

    #[test]
    fn not_found_message_names_entity_and_id() {
        let err = CoreError::not_found("user", "42");
        assert_eq!(err.to_string(), "user not found: 42");
    }
}
