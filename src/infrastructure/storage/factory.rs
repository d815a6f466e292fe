//! Storage factory for runtime backend selection

use std::sync::Arc;

use crate::config::{DatabaseConfig, StorageBackend};
use crate::domain::storage::{Storage, StorageEntity};
use crate::domain::DomainError;

use super::in_memory::InMemoryStorage;
use super::postgres::{DocumentStore, PostgresConfig};

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres(PostgresConfig),
}

impl StorageConfig {
    /// Builds the storage configuration from the database section of the
    /// application config. The PostgreSQL backend requires a connection URL.
    pub fn from_database_config(config: &DatabaseConfig) -> Result<Self, DomainError> {
        match config.backend {
            StorageBackend::InMemory => Ok(Self::InMemory),
            StorageBackend::Postgres => {
                let url = config
                    .url
                    .as_deref()
                    .filter(|url| !url.trim().is_empty())
                    .ok_or_else(|| {
                        DomainError::configuration(
                            "Database URL is not set (DATABASE_URL or APP__DATABASE__URL)",
                        )
                    })?;

                Ok(Self::Postgres(
                    PostgresConfig::new(url).with_connect_timeout(config.connect_timeout_secs),
                ))
            }
        }
    }

    /// Returns the storage backend
    pub fn backend(&self) -> StorageBackend {
        match self {
            Self::InMemory => StorageBackend::InMemory,
            Self::Postgres(_) => StorageBackend::Postgres,
        }
    }
}

/// Factory for creating collection handles
#[derive(Debug)]
pub struct StorageFactory;

impl StorageFactory {
    /// Opens the configured backend and returns the handle for `collection`
    pub async fn create<E>(
        config: &StorageConfig,
        collection: &str,
    ) -> Result<Arc<dyn Storage<E>>, DomainError>
    where
        E: StorageEntity + 'static,
    {
        match config {
            StorageConfig::InMemory => Ok(Arc::new(InMemoryStorage::<E>::new())),
            StorageConfig::Postgres(pg_config) => {
                let store = DocumentStore::connect(pg_config).await?;
                let storage = store.collection::<E>(collection).await?;
                Ok(Arc::new(storage))
            }
        }
    }
}
