//! Storage trait for the user entity

use crate::error::Result;
use crate::types::{CreateUser, User, UserId};
use async_trait::async_trait;

/// Persistence operations the HTTP layer depends on.
///
/// Each call is a single round-trip to the backing store: no transactions,
/// batching, caching or retries. Implementations must report a missing row
/// as [`CoreError::NotFound`](crate::CoreError::NotFound).
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user and return it with its store-assigned id
    async fn create_user(&self, user: CreateUser) -> Result<User>;

    /// Fetch one user by id
    async fn get_user(&self, id: UserId) -> Result<User>;

    /// Fetch every user, in whatever order the store returns them.
    ///
    /// Returns an empty vector when there are no users.
    async fn get_all_users(&self) -> Result<Vec<User>>;
}
