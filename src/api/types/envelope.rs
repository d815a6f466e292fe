//! Uniform response envelope
//!
//! Every response, success or failure, has the shape
//! `{"status": <int>, "message": "success"|"error", "data": {"data": <payload>}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::DomainError;

pub const MESSAGE_SUCCESS: &str = "success";
pub const MESSAGE_ERROR: &str = "error";

/// Keyed payload wrapper
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnvelopeData<T> {
    pub data: T,
}

/// Response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub status: u16,
    pub message: String,
    pub data: EnvelopeData<T>,
}

impl<T> Envelope<T> {
    pub fn new(status: StatusCode, message: impl Into<String>, payload: T) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
            data: EnvelopeData { data: payload },
        }
    }

    pub fn success(status: StatusCode, payload: T) -> Self {
        Self::new(status, MESSAGE_SUCCESS, payload)
    }

    pub fn ok(payload: T) -> Self {
        Self::success(StatusCode::OK, payload)
    }
}

impl<T> IntoResponse for Envelope<T>
where
    T: Serialize,
{
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

/// API error with status code, rendered as an error envelope
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Bad request error
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    /// Not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    /// Internal server error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn into_envelope(self) -> Envelope<String> {
        Envelope::new(self.status, MESSAGE_ERROR, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!(status = %self.status.as_u16(), message = %self.message, "Request failed");
        } else {
            debug!(status = %self.status.as_u16(), message = %self.message, "Request rejected");
        }

        self.into_envelope().into_response()
    }
}

/// Storage messages are passed through to the client unchanged.
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::NotFound { message } => Self::not_found(message),
            DomainError::Validation { message } => Self::bad_request(message),
            DomainError::Conflict { message } => Self::internal(message),
            DomainError::Configuration { message } => Self::internal(message),
            DomainError::Internal { message } => Self::internal(message),
            DomainError::Storage { message } => Self::internal(message),
            timeout @ DomainError::Timeout { .. } => Self::internal(timeout.to_string()),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.status.as_u16(), self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_success_envelope_shape() {
        let envelope = Envelope::success(StatusCode::CREATED, json!({"name": "A"}));

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"status": 201, "message": "success", "data": {"data": {"name": "A"}}})
        );
    }

    #[test]
    fn test_error_envelope_shape() {
        let envelope = ApiError::not_found("user not found").into_envelope();

        assert_eq!(
            serde_json::to_value(&envelope).unwrap(),
            json!({"status": 404, "message": "error", "data": {"data": "user not found"}})
        );
    }

    #[test]
    fn test_domain_error_conversion() {
        let cases = [
            (DomainError::not_found("x"), StatusCode::NOT_FOUND),
            (DomainError::validation("x"), StatusCode::BAD_REQUEST),
            (DomainError::conflict("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::storage("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::internal("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (DomainError::configuration("x"), StatusCode::INTERNAL_SERVER_ERROR),
            (
                DomainError::timeout(Duration::from_secs(10)),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (domain_err, status) in cases {
            assert_eq!(ApiError::from(domain_err).status, status);
        }
    }

    #[test]
    fn test_storage_message_passes_through() {
        let api_err = ApiError::from(DomainError::storage("Failed to create entity: boom"));

        assert_eq!(api_err.message, "Failed to create entity: boom");
    }

    #[test]
    fn test_timeout_message() {
        let api_err = ApiError::from(DomainError::timeout(Duration::from_secs(10)));

        assert_eq!(api_err.message, "Operation timed out after 10000ms");
    }

    #[test]
    fn test_api_error_response_status() {
        let response = ApiError::bad_request("bad").into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
