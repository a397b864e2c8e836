//! Provisioning and teardown of one test database

use crate::config::TestDatabaseConfig;
use crate::docker::{self, DockerNetwork};
use crate::error::{Result, TestDbError};
use crate::migrations;
use crate::readiness::collect_logs;
use crate::POSTGRES_PORT;
use testcontainers::{
    core::IntoContainerPort, runners::AsyncRunner, ContainerAsync, GenericImage, ImageExt,
};

type Container = ContainerAsync<GenericImage>;

/// A running, migrated PostgreSQL instance.
///
/// Call [`close`](Self::close) when finished; dropping without closing still
/// removes the containers but leaves the network and built image behind.
pub struct TestDatabase {
    /// Host the mapped port is reachable on
    pub host: String,
    /// Host-mapped PostgreSQL port
    pub port: u16,
    pub username: String,
    pub password: String,
    pub database: String,
    resources: Resources,
}

impl std::fmt::Debug for TestDatabase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TestDatabase")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("username", &self.username)
            .field("database", &self.database)
            .finish_non_exhaustive()
    }
}

impl TestDatabase {
    /// Launch PostgreSQL and apply the Liquibase migrations.
    ///
    /// Anything acquired before a failure is released before the error is
    /// returned.
    pub async fn start(config: TestDatabaseConfig) -> Result<Self> {
        Self::start_named(config, &unique_suffix()).await
    }

    /// `start` with a caller-chosen suffix for every resource name
    async fn start_named(config: TestDatabaseConfig, suffix: &str) -> Result<Self> {
        let mut resources = Resources::default();

        match provision(&config, suffix, &mut resources).await {
            Ok((host, port)) => {
                tracing::info!(%host, port, database = %config.database, "Test database ready");
                Ok(Self {
                    host,
                    port,
                    username: config.username,
                    password: config.password,
                    database: config.database,
                    resources,
                })
            }
            Err(e) => {
                tracing::error!(error = %e, "Test database provisioning failed");
                resources.release().await;
                Err(e)
            }
        }
    }

    /// Name of the private network both containers are attached to
    pub fn network_name(&self) -> Option<&str> {
        self.resources.network.as_ref().map(|n| n.name.as_str())
    }

    /// Release the migration container, the database container, the
    /// migration image and the network, in that order.
    pub async fn close(self) -> TeardownReport {
        self.resources.release().await
    }
}

/// One teardown step that did not complete
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeardownFailure {
    pub step: &'static str,
    pub error: String,
}

/// Outcome of a best-effort teardown
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TeardownReport {
    pub failures: Vec<TeardownFailure>,
}

impl TeardownReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    /// Record the outcome of one step; failures are logged, never raised.
    fn record(&mut self, step: &'static str, result: Result<()>) {
        match result {
            Ok(()) => tracing::debug!(step, "Released"),
            Err(e) => {
                tracing::warn!(step, error = %e, "Teardown step failed");
                self.failures.push(TeardownFailure {
                    step,
                    error: e.to_string(),
                });
            }
        }
    }
}

#[derive(Default)]
struct Resources {
    network: Option<DockerNetwork>,
    postgres: Option<Container>,
    migration_image: Option<String>,
    migrations: Option<Container>,
}

impl Resources {
    async fn release(self) -> TeardownReport {
        let mut report = TeardownReport::default();

        if let Some(container) = self.migrations {
            report.record("migration container", release_container(container).await);
        }
        if let Some(container) = self.postgres {
            report.record("postgres container", release_container(container).await);
        }
        if let Some(tag) = self.migration_image {
            report.record("migration image", docker::remove_image(&tag).await);
        }
        if let Some(network) = self.network {
            report.record("network", network.remove().await);
        }

        report
    }
}

/// Stop the container if it is still running, then remove it
async fn release_container(container: Container) -> Result<()> {
    if docker::is_running(container.id()).await? {
        container.stop().await?;
    }
    container.rm().await?;
    Ok(())
}

async fn provision(
    config: &TestDatabaseConfig,
    suffix: &str,
    resources: &mut Resources,
) -> Result<(String, u16)> {
    // Network
    let network = resources
        .network
        .insert(DockerNetwork::create(format!("userhub-test-{suffix}")).await?);
    let network_name = network.name.clone();

    // Postgres
    let container = GenericImage::new(config.postgres_image.as_str(), config.postgres_tag.as_str())
        .with_exposed_port(POSTGRES_PORT.tcp())
        .with_env_var("POSTGRES_USER", config.username.as_str())
        .with_env_var("POSTGRES_PASSWORD", config.password.as_str())
        .with_env_var("POSTGRES_DB", config.database.as_str())
        .with_network(network_name.as_str())
        .with_container_name(format!("userhub-db-{suffix}"))
        .start()
        .await?;
    let postgres = resources.postgres.insert(container);

    config.readiness.wait(postgres).await?;

    let host = postgres.get_host().await?.to_string();
    let port = postgres.get_host_port_ipv4(POSTGRES_PORT.tcp()).await?;
    let address = postgres.get_bridge_ip_address().await?;
    tracing::debug!(%host, port, %address, "Postgres accepting connections");

    // Liquibase migrations
    let image_name = format!("userhub-migrations-{suffix}");
    let image_tag = "latest";
    let image_ref = format!("{image_name}:{image_tag}");
    docker::build_image(&config.migrations_path, &image_ref).await?;
    resources.migration_image = Some(image_ref);

    let url = migrations::jdbc_url(address, POSTGRES_PORT, &config.database);
    let container = GenericImage::new(image_name.as_str(), image_tag)
        .with_cmd(migrations::update_args(
            &url,
            &config.username,
            &config.password,
        ))
        .with_network(network_name.as_str())
        .with_container_name(format!("userhub-migrations-{suffix}"))
        .start()
        .await?;
    let migrations = resources.migrations.insert(container);

    let exit_code = docker::wait_for_exit(migrations.id(), config.migration_timeout).await?;
    if exit_code != 0 {
        let logs = collect_logs(migrations).await.unwrap_or_default();
        return Err(TestDbError::MigrationFailed { exit_code, logs });
    }
    tracing::info!("Migrations applied");

    Ok((host, port))
}

/// Short random suffix so parallel test binaries never share names
fn unique_suffix() -> String {
    uuid::Uuid::new_v4().simple().to_string()[..12].to_string()
}
