//! Entity store: a migrated pool plus the repositories that run against it

use std::sync::Arc;

use sqlx::AnyPool;

use super::pool::{create_pool, StorageBackend};
use super::repos::{GodRepository, MythologyRepository, SqlGodRepo, SqlMythologyRepo};
use super::schema;
use super::seed::{seed_reference_data, SeedOutcome};

/// Handle to the backing database
#[derive(Clone)]
pub struct Store {
    pool: AnyPool,
    backend: StorageBackend,
}

impl Store {
    /// Connect to `backend` and bring the schema up to date.
    pub async fn open(backend: StorageBackend) -> Result<Self, sqlx::Error> {
        let pool = create_pool(&backend).await?;
        schema::migrate(&pool, backend.dialect()).await?;

        tracing::info!(backend = %backend, "Store ready");
        Ok(Self { pool, backend })
    }

    /// Fresh in-memory store (for testing)
    pub async fn open_in_memory() -> Result<Self, sqlx::Error> {
        Self::open(StorageBackend::Memory).await
    }

    pub fn pool(&self) -> &AnyPool {
        &self.pool
    }

    /// Drop and recreate every table.
    pub async fn reset(&self) -> Result<(), sqlx::Error> {
        schema::reset(&self.pool).await?;
        schema::migrate(&self.pool, self.backend.dialect()).await
    }

    /// Insert the reference pantheons unless mythologies already exist.
    pub async fn seed(&self) -> Result<SeedOutcome, sqlx::Error> {
        seed_reference_data(&self.pool).await
    }

    pub fn gods(&self) -> Arc<dyn GodRepository> {
        Arc::new(SqlGodRepo::new(self.pool.clone()))
    }

    pub fn mythologies(&self) -> Arc<dyn MythologyRepository> {
        Arc::new(SqlMythologyRepo::new(self.pool.clone()))
    }

    /// Wait for in-flight queries and close every connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn reset_clears_seeded_data() {
        let store = Store::open_in_memory().await.unwrap();
        store.seed().await.unwrap();
        assert_eq!(store.mythologies().count().await.unwrap(), 3);

        store.reset().await.unwrap();
        assert_eq!(store.mythologies().count().await.unwrap(), 0);
        assert!(store.gods().get_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn file_store_persists_between_opens() {
        let dir = tempfile::tempdir().unwrap();
        let backend = StorageBackend::Sqlite {
            path: dir.path().join("myth.db"),
        };

        let store = Store::open(backend.clone()).await.unwrap();
        store.seed().await.unwrap();
        store.close().await;

        let reopened = Store::open(backend).await.unwrap();
        assert_eq!(reopened.seed().await.unwrap(), SeedOutcome::AlreadyPresent);
        assert_eq!(reopened.gods().get_all().await.unwrap().len(), 20);
    }
}
