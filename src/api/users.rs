//! User endpoints

use axum::{
    extract::State,
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use utoipa::ToSchema;

use crate::api::schemas::{MessageEnvelopeSchema, UserEnvelopeSchema, UserListEnvelopeSchema};
use crate::api::state::AppState;
use crate::api::types::{ApiError, Envelope, Json, PathId};
use crate::domain::{User, UserFields};

/// Confirmation carried by a successful delete
pub const USER_DELETED: &str = "User successfully deleted!";

/// Request body for create and full replacement.
///
/// Missing fields read as empty strings so they are reported by validation.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UserRequest {
    #[schema(example = "Ada Lovelace")]
    pub name: String,
    #[schema(example = "London")]
    pub location: String,
    #[schema(example = "Engineer")]
    pub title: String,
}

impl From<UserRequest> for UserFields {
    fn from(request: UserRequest) -> Self {
        Self {
            name: request.name,
            location: request.location,
            title: request.title,
        }
    }
}

/// User as returned to clients
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub location: String,
    pub title: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().to_string(),
            name: user.name().to_string(),
            location: user.location().to_string(),
            title: user.title().to_string(),
        }
    }
}

/// POST /users
#[utoipa::path(
    post,
    path = "/users",
    request_body = UserRequest,
    responses(
        (status = 201, description = "User created", body = UserEnvelopeSchema),
        (status = 400, description = "Malformed body or failed validation", body = MessageEnvelopeSchema),
        (status = 500, description = "Storage failure", body = MessageEnvelopeSchema)
    ),
    tag = "users",
    operation_id = "createUser"
)]
pub async fn create_user(
    State(state): State<AppState>,
    Json(request): Json<UserRequest>,
) -> Result<Envelope<UserResponse>, ApiError> {
    debug!(name = %request.name, "Creating user");

    let user = state.user_service.create(request.into()).await?;

    Ok(Envelope::success(
        StatusCode::CREATED,
        UserResponse::from(&user),
    ))
}

/// GET /users/{user_id}
#[utoipa::path(
    get,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User found", body = UserEnvelopeSchema),
        (status = 404, description = "No user with this identifier", body = MessageEnvelopeSchema)
    ),
    tag = "users",
    operation_id = "getUser"
)]
pub async fn get_user(
    State(state): State<AppState>,
    user_id: PathId,
) -> Result<Envelope<UserResponse>, ApiError> {
    debug!(user_id = %user_id.as_str(), "Getting user");

    let user = state.user_service.get(user_id.as_str()).await?;

    Ok(Envelope::ok(UserResponse::from(&user)))
}

/// PUT /users/{user_id}
///
/// An identifier that matches nothing still answers 200, carrying the empty
/// user document.
#[utoipa::path(
    put,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    request_body = UserRequest,
    responses(
        (status = 200, description = "Updated user, or the empty user when nothing matched", body = UserEnvelopeSchema),
        (status = 400, description = "Malformed body or failed validation", body = MessageEnvelopeSchema),
        (status = 500, description = "Storage failure", body = MessageEnvelopeSchema)
    ),
    tag = "users",
    operation_id = "updateUser"
)]
pub async fn update_user(
    State(state): State<AppState>,
    user_id: PathId,
    Json(request): Json<UserRequest>,
) -> Result<Envelope<UserResponse>, ApiError> {
    debug!(user_id = %user_id.as_str(), "Updating user");

    let user = state
        .user_service
        .update(user_id.as_str(), request.into())
        .await?;

    Ok(Envelope::ok(UserResponse::from(&user)))
}

/// DELETE /users/{user_id}
#[utoipa::path(
    delete,
    path = "/users/{user_id}",
    params(("user_id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User deleted", body = MessageEnvelopeSchema),
        (status = 404, description = "No user with this identifier", body = MessageEnvelopeSchema),
        (status = 500, description = "Storage failure", body = MessageEnvelopeSchema)
    ),
    tag = "users",
    operation_id = "deleteUser"
)]
pub async fn delete_user(
    State(state): State<AppState>,
    user_id: PathId,
) -> Result<Envelope<String>, ApiError> {
    debug!(user_id = %user_id.as_str(), "Deleting user");

    state.user_service.delete(user_id.as_str()).await?;

    Ok(Envelope::ok(USER_DELETED.to_string()))
}

/// GET /users
#[utoipa::path(
    get,
    path = "/users",
    responses(
        (status = 200, description = "Every user, possibly none", body = UserListEnvelopeSchema),
        (status = 500, description = "Storage failure", body = MessageEnvelopeSchema)
    ),
    tag = "users",
    operation_id = "listUsers"
)]
pub async fn list_users(
    State(state): State<AppState>,
) -> Result<Envelope<Vec<UserResponse>>, ApiError> {
    debug!("Listing users");

    let users = state.user_service.list().await?;

    Ok(Envelope::ok(users.iter().map(UserResponse::from).collect()))
}
