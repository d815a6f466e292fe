//! User entity and related types

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::domain::storage::{DocumentFields, StorageEntity, StorageKey};
use crate::domain::DomainError;

/// User identifier, generated server-side at creation and never changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(Uuid);

impl UserId {
    /// Generate a fresh identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// The all-zero identifier carried by the empty document
    pub fn nil() -> Self {
        Self(Uuid::nil())
    }

    /// Parse an identifier from its textual form.
    ///
    /// Returns `None` for anything that is not a valid identifier; callers treat
    /// that the same as an identifier that matches no document.
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value).ok().map(Self)
    }
}

impl StorageKey for UserId {
    fn storage_key(&self) -> String {
        self.0.to_string()
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Client-supplied user attributes, used for both create and full replacement
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct UserFields {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub name: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub location: String,
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
}

impl UserFields {
    /// The field-level update set for these attributes
    pub fn to_document_fields(&self) -> Result<DocumentFields, DomainError> {
        match serde_json::to_value(self) {
            Ok(serde_json::Value::Object(fields)) => Ok(fields),
            Ok(_) => Err(DomainError::internal("User fields did not serialize to an object")),
            Err(e) => Err(DomainError::internal(format!(
                "Failed to serialize user fields: {}",
                e
            ))),
        }
    }
}

/// User document as persisted and returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
    location: String,
    title: String,
}

impl User {
    /// Create a user with a freshly generated identifier
    pub fn new(fields: UserFields) -> Self {
        Self::with_id(UserId::generate(), fields)
    }

    pub fn with_id(id: UserId, fields: UserFields) -> Self {
        Self {
            id,
            name: fields.name,
            location: fields.location,
            title: fields.title,
        }
    }

    /// The empty document: nil identifier and empty attributes
    pub fn empty() -> Self {
        Self::with_id(UserId::nil(), UserFields::default())
    }

    pub fn id(&self) -> &UserId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn title(&self) -> &str {
        &self.title
    }
}

impl StorageEntity for User {
    type Key = UserId;

    fn key(&self) -> &Self::Key {
        &self.id
    }
}
