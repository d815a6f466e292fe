use std::time::Duration;

use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Operation timed out after {millis}ms")]
    Timeout { millis: u64 },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn timeout(limit: Duration) -> Self {
        Self::Timeout {
            millis: u64::try_from(limit.as_millis()).unwrap_or(u64::MAX),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("user not found");
        assert_eq!(error.to_string(), "Not found: user not found");
    }

    #[test]
    fn test_validation_error() {
        let error = DomainError::validation("name: must not be empty");
        assert_eq!(error.to_string(), "Validation error: name: must not be empty");
    }

    #[test]
    fn test_timeout_error() {
        let error = DomainError::timeout(Duration::from_secs(10));
        assert_eq!(error.to_string(), "Operation timed out after 10000ms");
    }

    #[test]
    fn test_sub_second_timeout_keeps_precision() {
        let error = DomainError::timeout(Duration::from_millis(20));
        assert_eq!(error.to_string(), "Operation timed out after 20ms");
    }
}
