//! Provisioning configuration

use crate::readiness::LogReadiness;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_POSTGRES_IMAGE: &str = "postgres";
const DEFAULT_POSTGRES_TAG: &str = "15";
const DEFAULT_MIGRATION_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct TestDatabaseConfig {
    /// The database username
    pub username: String,
    /// The database password
    pub password: String,
    /// The database name
    pub database: String,
    /// Build context for the migration image: a `Dockerfile` plus the
    /// Liquibase changelog it copies in
    pub migrations_path: PathBuf,
    pub postgres_image: String,
    pub postgres_tag: String,
    /// When the database counts as accepting connections
    pub readiness: LogReadiness,
    /// How long the migration container may run before provisioning fails
    pub migration_timeout: Duration,
}

impl TestDatabaseConfig {
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        database: impl Into<String>,
        migrations_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
            database: database.into(),
            migrations_path: migrations_path.into(),
            postgres_image: DEFAULT_POSTGRES_IMAGE.to_string(),
            postgres_tag: DEFAULT_POSTGRES_TAG.to_string(),
            readiness: LogReadiness::default(),
            migration_timeout: DEFAULT_MIGRATION_TIMEOUT,
        }
    }

    pub fn with_postgres_image(mut self, image: impl Into<String>, tag: impl Into<String>) -> Self {
        self.postgres_image = image.into();
        self.postgres_tag = tag.into();
        self
    }

    pub fn with_readiness(mut self, readiness: LogReadiness) -> Self {
        self.readiness = readiness;
        self
    }

    pub fn with_migration_timeout(mut self, timeout: Duration) -> Self {
        self.migration_timeout = timeout;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_postgres_15_setup() {
        let config = TestDatabaseConfig::new("user", "pass", "users", "/tmp/migrations");

        assert_eq!(config.postgres_image, "postgres");
        assert_eq!(config.postgres_tag, "15");
        assert_eq!(config.migration_timeout, Duration::from_secs(10));
        assert_eq!(config.readiness.occurrences, 2);
        assert_eq!(config.readiness.timeout, Duration::from_secs(5));
    }

    #[test]
    fn builder_overrides_apply() {
        let config = TestDatabaseConfig::new("user", "pass", "users", "/tmp/migrations")
            .with_postgres_image("postgres", "16")
            .with_migration_timeout(Duration::from_secs(30))
            .with_readiness(LogReadiness::default().with_timeout(Duration::from_secs(20)));

        assert_eq!(config.postgres_tag, "16");
        assert_eq!(config.migration_timeout, Duration::from_secs(30));
        assert_eq!(config.readiness.timeout, Duration::from_secs(20));
    }
}
