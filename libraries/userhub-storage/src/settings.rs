//! Database connection settings

use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};

/// Coordinates needed to open a client connection
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DatabaseSettings {
    pub host: String,

    /// Port 0 means "unset"; the connection attempt will fail on first use
    pub port: u16,

    pub user: String,

    pub password: String,

    pub database: String,
}

impl DatabaseSettings {
    /// Driver options for these settings, with TLS disabled
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .username(&self.user)
            .password(&self.password)
            .database(&self.database)
            .ssl_mode(PgSslMode::Disable)
    }
}
