//! PostgreSQL document storage
//!
//! Each collection is a table holding one JSONB document per row, keyed by the
//! document's storage key.

use std::fmt::Debug;
use std::marker::PhantomData;
use std::time::Duration;

use async_trait::async_trait;
use futures::TryStreamExt;
use sqlx::postgres::{PgPool, PgPoolOptions, PgRow};
use sqlx::Row;
use tracing::{debug, info};

use crate::domain::storage::{DocumentFields, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

const MAX_COLLECTION_NAME_LENGTH: usize = 63;

/// PostgreSQL connection configuration
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Connection timeout in seconds, also bounds the startup liveness check
    pub connect_timeout_secs: u64,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            connect_timeout_secs: 10,
        }
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }
}

/// Validate a collection name before it is used as a table identifier
///
/// Rules:
/// - Starts with a lowercase ASCII letter
/// - Only lowercase ASCII letters, digits and underscores
/// - At most 63 characters
pub fn validate_collection_name(name: &str) -> Result<(), DomainError> {
    let mut chars = name.chars();

    let starts_with_letter = chars.next().is_some_and(|c| c.is_ascii_lowercase());
    let rest_valid = chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');

    if !starts_with_letter || !rest_valid || name.len() > MAX_COLLECTION_NAME_LENGTH {
        return Err(DomainError::configuration(format!(
            "Invalid collection name '{}'",
            name
        )));
    }

    Ok(())
}

/// Process-wide handle to the document store.
///
/// Cloning is cheap and every clone shares the same underlying connection pool,
/// which is safe for concurrent use.
#[derive(Clone)]
pub struct DocumentStore {
    pool: PgPool,
}

impl Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").finish_non_exhaustive()
    }
}

impl DocumentStore {
    /// Connects to the store and verifies it answers a liveness check.
    ///
    /// There is no retry: a failure here is meant to abort startup.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to connect to PostgreSQL: {}", e)))?;

        let store = Self { pool };
        store.ping().await?;

        info!("Connected to document store");
        Ok(store)
    }

    /// Liveness check
    pub async fn ping(&self) -> Result<(), DomainError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Document store ping failed: {}", e)))?;

        Ok(())
    }

    /// Returns the handle for a named collection, creating its table if needed
    pub async fn collection<E>(&self, name: &str) -> Result<PostgresStorage<E>, DomainError>
    where
        E: StorageEntity,
    {
        validate_collection_name(name)?;

        let storage = PostgresStorage::new(self.pool.clone(), name);
        storage.ensure_table().await?;

        debug!(collection = %name, "Collection ready");
        Ok(storage)
    }
}

/// A single document collection backed by a PostgreSQL table
pub struct PostgresStorage<E>
where
    E: StorageEntity,
{
    pool: PgPool,
    table_name: String,
    _phantom: PhantomData<E>,
}

impl<E> Debug for PostgresStorage<E>
where
    E: StorageEntity,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresStorage")
            .field("table_name", &self.table_name)
            .finish()
    }
}

impl<E> PostgresStorage<E>
where
    E: StorageEntity,
{
    fn new(pool: PgPool, table_name: impl Into<String>) -> Self {
        Self {
            pool,
            table_name: table_name.into(),
            _phantom: PhantomData,
        }
    }

    /// Ensures the collection table exists
    async fn ensure_table(&self) -> Result<(), DomainError> {
        let query = format!(
            r#"
            CREATE TABLE IF NOT EXISTS {} (
                key VARCHAR(255) PRIMARY KEY,
                data JSONB NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT clock_timestamp()
            )
            "#,
            self.table_name
        );

        sqlx::query(&query)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to create table: {}", e)))?;

        Ok(())
    }

    fn decode(row: &PgRow) -> Result<E, DomainError> {
        let data: serde_json::Value = row
            .try_get("data")
            .map_err(|e| DomainError::storage(format!("Failed to read document: {}", e)))?;

        serde_json::from_value(data)
            .map_err(|e| DomainError::storage(format!("Failed to deserialize entity: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for PostgresStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let query = format!("SELECT data FROM {} WHERE key = $1", self.table_name);

        let row = sqlx::query(&query)
            .bind(key.storage_key())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to get entity: {}", e)))?;

        row.as_ref().map(Self::decode).transpose()
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let query = format!(
            "SELECT data FROM {} ORDER BY created_at, key",
            self.table_name
        );

        // The cursor is released when `rows` drops, whichever way this returns.
        let mut rows = sqlx::query(&query).fetch(&self.pool);
        let mut entities = Vec::new();

        while let Some(row) = rows
            .try_next()
            .await
            .map_err(|e| DomainError::storage(format!("Failed to list entities: {}", e)))?
        {
            entities.push(Self::decode(&row)?);
        }

        Ok(entities)
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().storage_key();
        let data = serde_json::to_value(&entity)
            .map_err(|e| DomainError::storage(format!("Failed to serialize entity: {}", e)))?;

        let query = format!("INSERT INTO {} (key, data) VALUES ($1, $2)", self.table_name);

        sqlx::query(&query)
            .bind(&key)
            .bind(&data)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                if e.to_string().contains("duplicate key") {
                    DomainError::conflict(format!("Entity with key '{}' already exists", key))
                } else {
                    DomainError::storage(format!("Failed to create entity: {}", e))
                }
            })?;

        Ok(entity)
    }

    async fn update_fields(
        &self,
        key: &E::Key,
        mut fields: DocumentFields,
    ) -> Result<u64, DomainError> {
        fields.remove(E::KEY_FIELD);

        let query = format!(
            r#"
            UPDATE {}
            SET data = data || $2, updated_at = clock_timestamp()
            WHERE key = $1
            "#,
            self.table_name
        );

        let result = sqlx::query(&query)
            .bind(key.storage_key())
            .bind(serde_json::Value::Object(fields))
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to update entity: {}", e)))?;

        Ok(result.rows_affected())
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let query = format!("DELETE FROM {} WHERE key = $1", self.table_name);

        let result = sqlx::query(&query)
            .bind(key.storage_key())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::storage(format!("Failed to delete entity: {}", e)))?;

        Ok(result.rows_affected() > 0)
    }
}
