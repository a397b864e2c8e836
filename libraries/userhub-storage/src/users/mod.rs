//! User queries

use crate::error::{Result, StorageError};
use sqlx::PgPool;
use userhub_core::types::{CreateUser, User, UserId};

/// Insert a user and return the stored row
///
/// # Arguments
///
/// * `pool` - Database connection pool
/// * `user` - Creation payload; the id is assigned by the database
pub async fn create(pool: &PgPool, user: CreateUser) -> Result<User> {
    let created = sqlx::query_as::<_, User>(
        "INSERT INTO users (name) VALUES ($1) RETURNING id, name",
    )
    .bind(user.name)
    .fetch_one(pool)
    .await?;

    Ok(created)
}

/// Get a user by id
///
/// Returns `StorageError::NotFound` when no row matches.
pub async fn get_by_id(pool: &PgPool, id: UserId) -> Result<User> {
    sqlx::query_as::<_, User>("SELECT id, name FROM users WHERE id = $1")
        .bind(id)
        .fetch_one(pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StorageError::not_found("user", id.to_string()),
            other => other.into(),
        })
}

/// Get all users, in the order the database returns them
pub async fn get_all(pool: &PgPool) -> Result<Vec<User>> {
    let users = sqlx::query_as::<_, User>("SELECT id, name FROM users")
        .fetch_all(pool)
        .await?;

    Ok(users)
}
