//! User domain
//!
//! The single resource exposed by the service: user documents, their
//! identifiers and the validation rules applied to client-supplied fields.

mod entity;
mod validation;

pub use entity::{User, UserFields, UserId};
pub use validation::{validate_user_fields, UserValidationError};
