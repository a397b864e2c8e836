use crate::users;
use async_trait::async_trait;
use sqlx::PgPool;
use userhub_core::{error::Result, storage::UserStore, types::*};

/// PostgreSQL-backed user store
#[derive(Debug, Clone)]
pub struct PgUserStore {
    pool: PgPool,
}

impl PgUserStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Round-trip a trivial query to confirm the database is reachable
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(crate::StorageError::from)?;
        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn create_user(&self, user: CreateUser) -> Result<User> {
        Ok(users::create(&self.pool, user).await?)
    }

    async fn get_user(&self, id: UserId) -> Result<User> {
        Ok(users::get_by_id(&self.pool, id).await?)
    }

    async fn get_all_users(&self) -> Result<Vec<User>> {
        Ok(users::get_all(&self.pool).await?)
    }
}
