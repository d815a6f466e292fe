//! User service: one storage call per operation, bounded by a deadline

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, error, info, warn};

use crate::domain::storage::Storage;
use crate::domain::user::{validate_user_fields, User, UserFields, UserId};
use crate::domain::DomainError;

/// Upper bound for the storage work of a single operation
pub const OPERATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Message returned when a read does not find the user
pub const USER_NOT_FOUND: &str = "user not found";

const DELETE_TARGET_NOT_FOUND: &str = "User with specified ID not found!";

/// User service over an injected document collection
#[derive(Debug, Clone)]
pub struct UserService {
    storage: Arc<dyn Storage<User>>,
    timeout: Duration,
}

impl UserService {
    /// Create a new user service
    pub fn new(storage: Arc<dyn Storage<User>>) -> Self {
        Self {
            storage,
            timeout: OPERATION_TIMEOUT,
        }
    }

    /// Override the per-operation timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn deadline(&self) -> Instant {
        Instant::now() + self.timeout
    }

    async fn bounded<T>(
        &self,
        deadline: Instant,
        operation: impl Future<Output = Result<T, DomainError>>,
    ) -> Result<T, DomainError> {
        tokio::time::timeout_at(deadline, operation)
            .await
            .map_err(|_| DomainError::timeout(self.timeout))?
    }

    /// Create a user with a freshly generated identifier
    pub async fn create(&self, fields: UserFields) -> Result<User, DomainError> {
        let deadline = self.deadline();

        validate_user_fields(&fields).map_err(|e| DomainError::validation(e.to_string()))?;

        let user = User::new(fields);
        info!(id = %user.id(), "Creating user");

        self.bounded(deadline, self.storage.create(user)).await
    }

    /// Get a user by the textual identifier taken from a request path.
    ///
    /// Every failure reads as not found: an unparsable identifier, no match, a
    /// storage error or an expired deadline. The cause is only logged.
    pub async fn get(&self, id: &str) -> Result<User, DomainError> {
        let deadline = self.deadline();

        let Some(user_id) = UserId::parse(id) else {
            debug!(id = %id, "Unparsable user id");
            return Err(DomainError::not_found(USER_NOT_FOUND));
        };

        match self.bounded(deadline, self.storage.get(&user_id)).await {
            Ok(Some(user)) => Ok(user),
            Ok(None) => Err(DomainError::not_found(USER_NOT_FOUND)),
            Err(e) => {
                error!(id = %user_id, error = %e, "Failed to read user");
                Err(DomainError::not_found(USER_NOT_FOUND))
            }
        }
    }

    /// Replace the name, location and title of a user.
    ///
    /// When no document matches (including an unparsable identifier) the empty
    /// document is returned instead of an error.
    pub async fn update(&self, id: &str, fields: UserFields) -> Result<User, DomainError> {
        let deadline = self.deadline();

        validate_user_fields(&fields).map_err(|e| DomainError::validation(e.to_string()))?;

        let Some(user_id) = UserId::parse(id) else {
            warn!(id = %id, "Update targeted an unparsable user id, nothing matched");
            return Ok(User::empty());
        };

        info!(id = %user_id, "Updating user");

        let update_set = fields.to_document_fields()?;
        let matched = self
            .bounded(deadline, self.storage.update_fields(&user_id, update_set))
            .await?;

        if matched != 1 {
            warn!(id = %user_id, matched, "Update matched no user");
            return Ok(User::empty());
        }

        self.bounded(deadline, self.storage.get(&user_id))
            .await?
            .ok_or_else(|| {
                DomainError::storage(format!("User '{}' vanished after update", user_id))
            })
    }

    /// Delete a user
    pub async fn delete(&self, id: &str) -> Result<(), DomainError> {
        let deadline = self.deadline();

        let Some(user_id) = UserId::parse(id) else {
            debug!(id = %id, "Unparsable user id");
            return Err(DomainError::not_found(DELETE_TARGET_NOT_FOUND));
        };

        info!(id = %user_id, "Deleting user");

        if self
            .bounded(deadline, self.storage.delete(&user_id))
            .await?
        {
            Ok(())
        } else {
            Err(DomainError::not_found(DELETE_TARGET_NOT_FOUND))
        }
    }

    /// List every user
    pub async fn list(&self) -> Result<Vec<User>, DomainError> {
        let deadline = self.deadline();

        self.bounded(deadline, self.storage.list()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::storage::mock::MockStorage;
    use crate::infrastructure::storage::InMemoryStorage;
    use tokio_test::{assert_err, assert_ok};

    fn fields(name: &str, location: &str, title: &str) -> UserFields {
        UserFields {
            name: name.to_string(),
            location: location.to_string(),
            title: title.to_string(),
        }
    }

    fn in_memory_service() -> UserService {
        UserService::new(Arc::new(InMemoryStorage::<User>::new()))
    }

    #[tokio::test]
    async fn test_create_echoes_fields() {
        let service = in_memory_service();

        let user = service.create(fields("A", "X", "Eng")).await.unwrap();

        assert_eq!(user.name(), "A");
        assert_eq!(user.location(), "X");
        assert_eq!(user.title(), "Eng");
        assert_ne!(*user.id(), UserId::nil());
    }

    #[tokio::test]
    async fn test_create_invalid_performs_no_insert() {
        let storage = Arc::new(MockStorage::<User>::new());
        let service = UserService::new(storage.clone());

        let result = service.create(fields("A", "", "Eng")).await;

        match result {
            Err(DomainError::Validation { message }) => {
                assert_eq!(message, "location: must not be empty")
            }
            other => panic!("Expected validation error, got {:?}", other),
        }
        assert_eq!(storage.len(), 0);
    }

    #[tokio::test]
    async fn test_create_storage_failure_passes_message_through() {
        let storage = Arc::new(MockStorage::<User>::new().with_error("connection reset"));
        let service = UserService::new(storage);

        let result = service.create(fields("A", "X", "Eng")).await;

        match result {
            Err(DomainError::Storage { message }) => assert_eq!(message, "connection reset"),
            other => panic!("Expected storage error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_get_returns_last_written() {
        let service = in_memory_service();
        let created = service.create(fields("A", "X", "Eng")).await.unwrap();

        let fetched = service.get(&created.id().to_string()).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn test_get_missing_and_malformed_are_indistinguishable() {
        let service = in_memory_service();

        let missing = service.get(&UserId::generate().to_string()).await.unwrap_err();
        let malformed = service.get("not-a-valid-id").await.unwrap_err();

        assert_eq!(missing.to_string(), malformed.to_string());
        assert!(matches!(missing, DomainError::NotFound { .. }));
        assert_eq!(missing.to_string(), "Not found: user not found");
    }

    #[tokio::test]
    async fn test_get_storage_failure_reads_as_not_found() {
        let storage = MockStorage::<User>::new().with_error("db down");
        let service = UserService::new(Arc::new(storage));

        let err = service.get(&UserId::generate().to_string()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
        assert_eq!(err.to_string(), "Not found: user not found");
    }

    #[tokio::test]
    async fn test_get_timeout_reads_as_not_found() {
        let storage = MockStorage::<User>::new().with_delay(Duration::from_millis(500));
        let service = UserService::new(Arc::new(storage)).with_timeout(Duration::from_millis(20));

        let err = service.get(&UserId::generate().to_string()).await.unwrap_err();

        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_update_changes_fields_and_keeps_id() {
        let service = in_memory_service();
        let created = service.create(fields("A", "X", "Eng")).await.unwrap();
        let id = created.id().to_string();

        let updated = service.update(&id, fields("B", "Y", "Mgr")).await.unwrap();

        assert_eq!(updated.id(), created.id());
        assert_eq!(updated.name(), "B");
        assert_eq!(updated.location(), "Y");
        assert_eq!(updated.title(), "Mgr");
        assert_eq!(service.get(&id).await.unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_without_match_returns_empty_user() {
        let service = in_memory_service();

        let missing = service
            .update(&UserId::generate().to_string(), fields("B", "Y", "Mgr"))
            .await
            .unwrap();
        let malformed = service
            .update("nope", fields("B", "Y", "Mgr"))
            .await
            .unwrap();

        assert_eq!(missing, User::empty());
        assert_eq!(malformed, User::empty());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_validates_before_touching_storage() {
        let storage = Arc::new(MockStorage::<User>::new().with_error("should not be reached"));
        let service = UserService::new(storage);

        let result = service.update("nope", fields("", "", "")).await;

        assert!(matches!(result, Err(DomainError::Validation { .. })));
    }

    #[tokio::test]
    async fn test_update_storage_failure_passes_message_through() {
        let storage = MockStorage::<User>::new().with_error("write refused");
        let service = UserService::new(Arc::new(storage));

        let result = service
            .update(&UserId::generate().to_string(), fields("B", "Y", "Mgr"))
            .await;

        match result {
            Err(DomainError::Storage { message }) => assert_eq!(message, "write refused"),
            other => panic!("Expected storage error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_update_fails_when_user_vanishes_before_reread() {
        let existing = User::new(fields("A", "X", "Eng"));
        let id = existing.id().to_string();
        let storage = MockStorage::<User>::new()
            .with_entity(existing)
            .with_vanishing_updates();
        let service = UserService::new(Arc::new(storage));

        let result = service.update(&id, fields("B", "Y", "Mgr")).await;

        assert!(matches!(result, Err(DomainError::Storage { .. })));
    }

    #[tokio::test]
    async fn test_delete_storage_failure_passes_message_through() {
        let storage = MockStorage::<User>::new().with_error("delete refused");
        let service = UserService::new(Arc::new(storage));

        let result = service.delete(&UserId::generate().to_string()).await;

        match result {
            Err(DomainError::Storage { message }) => assert_eq!(message, "delete refused"),
            other => panic!("Expected storage error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = in_memory_service();
        let created = service.create(fields("A", "X", "Eng")).await.unwrap();
        let id = created.id().to_string();

        assert_ok!(service.delete(&id).await);
        assert!(matches!(
            service.delete(&id).await,
            Err(DomainError::NotFound { .. })
        ));
        assert!(matches!(
            service.get(&id).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_malformed_id() {
        let service = in_memory_service();

        let err = service.delete("xyz").await.unwrap_err();
        assert_eq!(err.to_string(), "Not found: User with specified ID not found!");
    }

    #[tokio::test]
    async fn test_list_returns_every_live_user_once() {
        let service = in_memory_service();
        assert!(service.list().await.unwrap().is_empty());

        let first = service.create(fields("A", "X", "Eng")).await.unwrap();
        let second = service.create(fields("B", "Y", "Ops")).await.unwrap();
        let third = service.create(fields("C", "Z", "QA")).await.unwrap();
        service.delete(&second.id().to_string()).await.unwrap();

        let users = service.list().await.unwrap();
        assert_eq!(users, vec![first, third]);
    }

    #[tokio::test]
    async fn test_list_storage_failure() {
        let service = UserService::new(Arc::new(
            MockStorage::<User>::new().with_error("cursor failed"),
        ));

        assert_err!(service.list().await);
    }

    #[tokio::test]
    async fn test_operations_time_out() {
        let storage = Arc::new(MockStorage::<User>::new().with_delay(Duration::from_millis(500)));
        let service = UserService::new(storage).with_timeout(Duration::from_millis(20));

        let result = service.list().await;
        match result {
            Err(err @ DomainError::Timeout { .. }) => {
                assert_eq!(err.to_string(), "Operation timed out after 20ms")
            }
            other => panic!("Expected timeout, got {:?}", other),
        }

        let result = service.create(fields("A", "X", "Eng")).await;
        assert!(matches!(result, Err(DomainError::Timeout { .. })));
    }
}
