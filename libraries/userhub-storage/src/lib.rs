//! Userhub Storage
//!
//! PostgreSQL persistence for the user entity.
//!
//! # Architecture
//!
//! - **Vertical Slicing**: each entity owns its own queries (`users`)
//! - **Pooled**: all access goes through a shared `PgPool`
//! - **Lazy Connect**: the pool is created without touching the server, so a
//!   bad host or port surfaces on first use
//! - **Schema Outside**: tables are created by the Liquibase changelog under
//!   `migrations/`, not by this crate
//!
//! # Example
//!
//! ```rust,no_run
//! use userhub_core::{CreateUser, UserStore};
//! use userhub_storage::{create_pool, DatabaseSettings, PgUserStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = DatabaseSettings {
//!     host: "localhost".to_string(),
//!     port: 5432,
//!     user: "user".to_string(),
//!     password: "password".to_string(),
//!     database: "users".to_string(),
//! };
//! let store = PgUserStore::new(create_pool(&settings));
//!
//! let user = store.create_user(CreateUser::new("Alice")).await?;
//! let again = store.get_user(user.id).await?;
//! assert_eq!(user, again);
//! # Ok(())
//! # }
//! ```

mod context;
mod error;
mod settings;

// Vertical slices
pub mod users;

pub use context::PgUserStore;
pub use error::StorageError;
pub use settings::DatabaseSettings;

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

/// Maximum pooled connections per process
const MAX_CONNECTIONS: u32 = 10;

/// Create a new PostgreSQL pool
///
/// No connection is opened here; the first query does that.
///
/// # Arguments
///
/// * `settings` - Connection coordinates (host, port, credentials, database)
pub fn create_pool(settings: &DatabaseSettings) -> PgPool {
    tracing::debug!(
        host = %settings.host,
        port = settings.port,
        database = %settings.database,
        "Creating PostgreSQL pool"
    );

    PgPoolOptions::new()
        .max_connections(MAX_CONNECTIONS)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(settings.connect_options())
}
