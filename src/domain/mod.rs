//! Domain layer - entities, errors and storage abstractions

pub mod error;
pub mod storage;
pub mod user;

pub use error::DomainError;
pub use storage::{DocumentFields, Storage, StorageEntity, StorageKey};
pub use user::{User, UserFields, UserId, UserValidationError};
