//! Storage infrastructure - document collection implementations

mod factory;
mod in_memory;
mod postgres;

pub use factory::{StorageConfig, StorageFactory};
pub use in_memory::InMemoryStorage;
pub use postgres::{validate_collection_name, DocumentStore, PostgresConfig, PostgresStorage};
