/// Storage-specific errors
use thiserror::Error;

/// Result type alias using `StorageError`
pub type Result<T> = std::result::Result<T, StorageError>;

/// Storage error types
#[derive(Error, Debug)]
pub enum StorageError {
    /// Entity not found
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Database error from `SQLx`
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

impl StorageError {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

impl From<StorageError> for userhub_core::CoreError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound { entity, id } => Self::NotFound { entity, id },
            StorageError::Database(e) => Self::storage(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use userhub_core::CoreError;

    #[test]
    fn not_found_keeps_its_kind_across_the_boundary() {
        let core: CoreError = StorageError::not_found("user", "7").into();
        assert!(core.is_not_found());
        assert_eq!(core.to_string(), "user not found: 7");
    }

    #[test]
    fn driver_errors_become_storage_errors() {
        let core: CoreError = StorageError::Database(sqlx::Error::PoolTimedOut).into();
        assert!(matches!(core, CoreError::Storage(_)));
    }
}
