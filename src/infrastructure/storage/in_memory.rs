//! In-memory storage implementation

use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::RwLock;

use async_trait::async_trait;

use crate::domain::storage::{apply_fields, DocumentFields, Storage, StorageEntity, StorageKey};
use crate::domain::DomainError;

#[derive(Debug)]
struct Collection<E> {
    next_seq: u64,
    documents: HashMap<String, (u64, E)>,
}

/// Thread-safe in-memory document collection
///
/// Useful for testing and development. Data is lost when the process terminates.
#[derive(Debug)]
pub struct InMemoryStorage<E>
where
    E: StorageEntity,
{
    collection: RwLock<Collection<E>>,
}

impl<E> Default for InMemoryStorage<E>
where
    E: StorageEntity,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> InMemoryStorage<E>
where
    E: StorageEntity,
{
    /// Creates a new empty in-memory storage
    pub fn new() -> Self {
        Self {
            collection: RwLock::new(Collection {
                next_seq: 0,
                documents: HashMap::new(),
            }),
        }
    }

    fn read(&self) -> Result<std::sync::RwLockReadGuard<'_, Collection<E>>, DomainError> {
        self.collection
            .read()
            .map_err(|e| DomainError::storage(format!("Failed to acquire read lock: {}", e)))
    }

    fn write(&self) -> Result<std::sync::RwLockWriteGuard<'_, Collection<E>>, DomainError> {
        self.collection
            .write()
            .map_err(|e| DomainError::storage(format!("Failed to acquire write lock: {}", e)))
    }
}

#[async_trait]
impl<E> Storage<E> for InMemoryStorage<E>
where
    E: StorageEntity + 'static,
{
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError> {
        let collection = self.read()?;

        Ok(collection
            .documents
            .get(&key.storage_key())
            .map(|(_, entity)| entity.clone()))
    }

    async fn list(&self) -> Result<Vec<E>, DomainError> {
        let collection = self.read()?;

        let mut slots: Vec<&(u64, E)> = collection.documents.values().collect();
        slots.sort_by_key(|(seq, _)| *seq);

        Ok(slots.into_iter().map(|(_, entity)| entity.clone()).collect())
    }

    async fn create(&self, entity: E) -> Result<E, DomainError> {
        let key = entity.key().storage_key();
        let mut collection = self.write()?;

        if collection.documents.contains_key(&key) {
            return Err(DomainError::conflict(format!(
                "Entity with key '{}' already exists",
                key
            )));
        }

        let seq = collection.next_seq;
        collection.next_seq += 1;
        collection.documents.insert(key, (seq, entity.clone()));

        Ok(entity)
    }

    async fn update_fields(
        &self,
        key: &E::Key,
        fields: DocumentFields,
    ) -> Result<u64, DomainError> {
        let mut collection = self.write()?;

        match collection.documents.get_mut(&key.storage_key()) {
            Some((_, entity)) => {
                *entity = apply_fields(entity, fields)?;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError> {
        let mut collection = self.write()?;

        Ok(collection.documents.remove(&key.storage_key()).is_some())
    }
}
