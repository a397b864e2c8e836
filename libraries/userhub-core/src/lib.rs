//! Userhub Core
//!
//! Transport- and storage-agnostic building blocks shared by the server,
//! the storage layer and the test harness.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `User` and the `CreateUser` payload
//! - **Storage Trait**: `UserStore`, the seam the HTTP layer depends on
//! - **Error Handling**: `CoreError`, which keeps "not found" apart from every other failure
//!
//! # Example
//!
//! ```rust
//! use userhub_core::{CreateUser, User};
//!
//! let payload: CreateUser = serde_json::from_str(r#"{"name": "Alice"}"#).unwrap();
//! let user = User::new(1, payload.name);
//! assert_eq!(user.name, "Alice");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod error;
pub mod storage;
pub mod types;

pub use error::{CoreError, Result};
pub use storage::UserStore;
pub use types::{CreateUser, User, UserId};
