//! Wire types shared by every endpoint

pub mod envelope;
pub mod json;
pub mod path;

pub use envelope::{ApiError, Envelope, EnvelopeData, MESSAGE_ERROR, MESSAGE_SUCCESS};
pub use json::Json;
pub use path::PathId;
