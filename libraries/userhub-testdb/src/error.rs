/// Provisioning error types
use std::time::Duration;
use thiserror::Error;

/// Result type alias using `TestDbError`
pub type Result<T> = std::result::Result<T, TestDbError>;

#[derive(Debug, Error)]
pub enum TestDbError {
    /// A docker CLI invocation failed to spawn or exited non-zero
    #[error("docker {command} failed: {message}")]
    Docker { command: String, message: String },

    /// Container runtime error from testcontainers
    #[error("container error: {0}")]
    Container(#[from] testcontainers::TestcontainersError),

    /// A readiness or completion gate did not open in time
    #[error("timed out after {after:?} waiting for {what}")]
    Timeout { what: String, after: Duration },

    /// The migration container exited with a non-zero status
    #[error("migrations exited with code {exit_code}:\n{logs}")]
    MigrationFailed { exit_code: i64, logs: String },

    /// The migrations build context is unusable
    #[error("invalid migrations directory {path}: {reason}")]
    InvalidMigrations { path: String, reason: String },
}

impl TestDbError {
    pub(crate) fn docker(command: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Docker {
            command: command.into(),
            message: message.into(),
        }
    }

    pub(crate) fn timeout(what: impl Into<String>, after: Duration) -> Self {
        Self::Timeout {
            what: what.into(),
            after,
        }
    }
}
