//! OpenAPI schema definitions for the response envelopes.
//!
//! The envelope is generic over its payload; these concrete mirrors give the
//! documentation one named schema per payload shape.

#![allow(dead_code)]

use utoipa::ToSchema;

/// A user document
#[derive(ToSchema)]
pub struct UserSchema {
    /// Server-generated identifier
    #[schema(example = "6f1c2a52-3c1e-4d0b-9a57-3f2e4b1c0d9e")]
    id: String,
    #[schema(example = "Ada Lovelace")]
    name: String,
    #[schema(example = "London")]
    location: String,
    #[schema(example = "Engineer")]
    title: String,
}

#[derive(ToSchema)]
pub struct UserDataSchema {
    data: UserSchema,
}

/// Envelope carrying a single user
#[derive(ToSchema)]
pub struct UserEnvelopeSchema {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "success")]
    message: String,
    data: UserDataSchema,
}

#[derive(ToSchema)]
pub struct UserListDataSchema {
    data: Vec<UserSchema>,
}

/// Envelope carrying every user
#[derive(ToSchema)]
pub struct UserListEnvelopeSchema {
    #[schema(example = 200)]
    status: u16,
    #[schema(example = "success")]
    message: String,
    data: UserListDataSchema,
}

#[derive(ToSchema)]
pub struct MessageDataSchema {
    #[schema(example = "user not found")]
    data: String,
}

/// Envelope carrying a human-readable message, used by every error
#[derive(ToSchema)]
pub struct MessageEnvelopeSchema {
    #[schema(example = 404)]
    status: u16,
    #[schema(example = "error")]
    message: String,
    data: MessageDataSchema,
}
