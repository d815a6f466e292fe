//! User infrastructure module
//!
//! The user service maps each user operation onto a single call against the
//! injected document collection.

mod service;

pub use service::{UserService, OPERATION_TIMEOUT, USER_NOT_FOUND};
