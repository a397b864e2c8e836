//! Userhub Server Library
//!
//! HTTP CRUD service over the user entity.
//!
//! This library exposes the core components for testing purposes.

pub mod api;
pub mod config;
pub mod error;
pub mod state;

// Re-export commonly used types for convenience
pub use api::create_router;
pub use config::{ServerConfig, ServerSettings};
pub use error::{Result, ServerError};
pub use state::AppState;
