//! Userhub Test Database
//!
//! Stands up a throwaway PostgreSQL instance with the Liquibase schema
//! applied, for the duration of one test, and tears it down again.
//!
//! # Lifecycle
//!
//! 1. A private bridge network is created so the two containers can reach
//!    each other without going through the host.
//! 2. `postgres:15` starts on that network. Readiness is a log predicate:
//!    the server prints "database system is ready to accept connections"
//!    once for the init-time instance and once for the real listener, so
//!    two occurrences are required.
//! 3. The migration image is built from the caller's build context and run
//!    on the same network against the container address, not the host
//!    mapping. A non-zero exit or a timeout fails provisioning.
//! 4. The caller gets host, mapped port and credentials.
//! 5. [`TestDatabase::close`] releases everything in reverse order. Each step
//!    is independent: a failure is logged and recorded, the rest still run.
//!
//! # Example
//!
//! ```rust,no_run
//! use userhub_testdb::{migrations_dir, TestDatabase, TestDatabaseConfig};
//!
//! # async fn example() -> Result<(), userhub_testdb::TestDbError> {
//! let db = TestDatabase::start(TestDatabaseConfig::new(
//!     "user",
//!     "password",
//!     "users",
//!     migrations_dir(),
//! ))
//! .await?;
//!
//! println!("postgres listening on {}:{}", db.host, db.port);
//!
//! let report = db.close().await;
//! assert!(report.is_clean());
//! # Ok(())
//! # }
//! ```
//!
//! # Requirements
//!
//! - Docker must be installed and running
//! - The `docker` CLI must be on `PATH` (network and image management)

mod config;
mod database;
mod docker;
mod error;
mod migrations;
mod readiness;

pub use config::TestDatabaseConfig;
pub use database::{TeardownFailure, TeardownReport, TestDatabase};
pub use error::{Result, TestDbError};
pub use readiness::{count_occurrences, LogReadiness, POSTGRES_READY_MESSAGE};

use std::path::PathBuf;

/// Port PostgreSQL listens on inside its container
pub const POSTGRES_PORT: u16 = 5432;

/// The workspace `migrations/` directory (Liquibase changelog + Dockerfile).
pub fn migrations_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("migrations")
}

/// Check whether the docker CLI can reach a daemon
pub fn is_docker_available() -> bool {
    std::process::Command::new("docker")
        .arg("info")
        .output()
        .map(|output| output.status.success())
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn migrations_dir_holds_the_build_context() {
        let dir = migrations_dir();
        assert!(dir.join("Dockerfile").is_file(), "missing {:?}", dir);
        assert!(dir.join("changelog").join("changelog.xml").is_file());
        assert!(dir
            .join("changelog")
            .join("liquibase.docker.properties")
            .is_file());
    }
}
