//! Storage trait definition

use std::fmt::Debug;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::domain::DomainError;

use super::entity::StorageEntity;

/// Field-level update set: document field name to new value
pub type DocumentFields = Map<String, Value>;

/// Generic storage trait over a single document collection
#[async_trait]
pub trait Storage<E>: Send + Sync + Debug
where
    E: StorageEntity + 'static,
{
    /// Retrieves a document by its key
    async fn get(&self, key: &E::Key) -> Result<Option<E>, DomainError>;

    /// Retrieves every document in insertion order.
    ///
    /// A document that fails to decode aborts the whole listing; no partial
    /// result is returned.
    async fn list(&self) -> Result<Vec<E>, DomainError>;

    /// Inserts a new document, returns a conflict error if the key is taken
    async fn create(&self, entity: E) -> Result<E, DomainError>;

    /// Sets the given fields on the document matching `key` and returns the
    /// number of matched documents (0 or 1). The key field is never written.
    async fn update_fields(&self, key: &E::Key, fields: DocumentFields)
    -> Result<u64, DomainError>;

    /// Deletes a document by its key, returns true if one was removed
    async fn delete(&self, key: &E::Key) -> Result<bool, DomainError>;
}

/// Applies a field-level update to an entity through its document form.
///
/// Used by backends that hold decoded entities rather than raw documents.
pub fn apply_fields<E>(entity: &E, mut fields: DocumentFields) -> Result<E, DomainError>
where
    E: StorageEntity,
{
    fields.remove(E::KEY_FIELD);

    let mut document = serde_json::to_value(entity)
        .map_err(|e| DomainError::storage(format!("Failed to serialize entity: {}", e)))?;

    let Value::Object(ref mut object) = document else {
        return Err(DomainError::storage("Entity is not stored as a JSON object"));
    };
    object.extend(fields);

    serde_json::from_value(document)
        .map_err(|e| DomainError::storage(format!("Failed to deserialize entity: {}", e)))
}
