/// Server configuration
use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use userhub_storage::DatabaseSettings;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default)]
    pub server: ServerSettings,

    /// Filled from the `DB_*` variables, never from the config file
    #[serde(skip)]
    pub database: DatabaseSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Raw `DB_*` values, all optional strings so nothing fails to parse
#[derive(Debug, Default, Deserialize)]
struct DatabaseEnv {
    host: Option<String>,
    port: Option<String>,
    user: Option<String>,
    password: Option<String>,
    name: Option<String>,
}

impl From<DatabaseEnv> for DatabaseSettings {
    fn from(env: DatabaseEnv) -> Self {
        DatabaseSettings {
            host: env.host.unwrap_or_default(),
            port: env.port.as_deref().map(parse_port).unwrap_or(0),
            user: env.user.unwrap_or_default(),
            password: env.password.unwrap_or_default(),
            database: env.name.unwrap_or_default(),
        }
    }
}

impl ServerConfig {
    /// Load configuration from file and environment
    pub fn load() -> Result<Self> {
        let mut config = Self::load_server_settings(None)?;
        config.database = Self::load_database_settings(config::Environment::with_prefix("DB"))?;
        Ok(config)
    }

    /// Listener settings: `config.toml` (if present) overridden by
    /// `USERHUB_SERVER_HOST` / `USERHUB_SERVER_PORT`
    fn load_server_settings(env: Option<config::Map<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        let config_path = PathBuf::from("config.toml");
        if config_path.exists() {
            settings = settings.add_source(config::File::from(config_path));
        }

        settings = settings.add_source(
            config::Environment::with_prefix("USERHUB")
                .separator("_")
                .try_parsing(true)
                .source(env),
        );

        Ok(settings.build()?.try_deserialize()?)
    }

    /// Database coordinates from `DB_HOST`, `DB_PORT`, `DB_USER`,
    /// `DB_PASSWORD` and `DB_NAME`.
    ///
    /// Missing values become empty; a missing or non-numeric port becomes 0.
    /// Nothing is validated eagerly.
    fn load_database_settings(source: config::Environment) -> Result<DatabaseSettings> {
        let env: DatabaseEnv = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;
        Ok(env.into())
    }

    /// Socket address string the listener binds to
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

fn parse_port(raw: &str) -> u16 {
    raw.trim().parse().unwrap_or(0)
}

// Default values
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}
