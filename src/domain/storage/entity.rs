//! Storage entity traits and types

use std::fmt::Debug;

use serde::{de::DeserializeOwned, Serialize};

/// Trait for types that can be used as document keys
pub trait StorageKey: Clone + Debug + Send + Sync + Eq + std::hash::Hash {
    /// Returns the textual form used as the primary key by storage backends
    fn storage_key(&self) -> String;
}

/// Trait for documents that can be stored in a collection
pub trait StorageEntity: Clone + Debug + Send + Sync + Serialize + DeserializeOwned {
    /// The key type for this entity
    type Key: StorageKey;

    /// Name of the document field holding the key. Field updates never touch it.
    const KEY_FIELD: &'static str = "id";

    /// Returns the entity's key
    fn key(&self) -> &Self::Key;
}
