//! User validation utilities

use thiserror::Error;
use validator::Validate;

use super::entity::UserFields;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    /// One entry per failing field, formatted as `field: reason`
    #[error("{}", .0.join("; "))]
    InvalidFields(Vec<String>),
}

/// Validate client-supplied user fields
///
/// Rules:
/// - `name`, `location` and `title` are required and must not be empty
pub fn validate_user_fields(fields: &UserFields) -> Result<(), UserValidationError> {
    fields.validate().map_err(|errors| {
        let mut violations: Vec<String> = errors
            .field_errors()
            .into_iter()
            .map(|(field, field_errors)| {
                let reasons: Vec<String> = field_errors
                    .iter()
                    .map(|e| {
                        e.message
                            .as_deref()
                            .map(str::to_string)
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                format!("{}: {}", field, reasons.join(", "))
            })
            .collect();

        violations.sort();
        UserValidationError::InvalidFields(violations)
    })
}
