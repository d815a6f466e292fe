//! OpenAPI document for the REST API, served by Swagger UI and printed by
//! the `openapi` subcommand.

use utoipa::OpenApi;

use crate::api::schemas::{
    MessageDataSchema, MessageEnvelopeSchema, UserDataSchema, UserEnvelopeSchema,
    UserListDataSchema, UserListEnvelopeSchema, UserSchema,
};
use crate::api::users::UserRequest;

/// Path of the generated OpenAPI JSON document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// Path Swagger UI is served under
pub const SWAGGER_UI_PATH: &str = "/swagger";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Users API",
        description = "CRUD operations on user documents. Every response uses the same envelope."
    ),
    paths(
        crate::api::users::create_user,
        crate::api::users::get_user,
        crate::api::users::update_user,
        crate::api::users::delete_user,
        crate::api::users::list_users,
    ),
    components(schemas(
        UserRequest,
        UserSchema,
        UserDataSchema,
        UserEnvelopeSchema,
        UserListDataSchema,
        UserListEnvelopeSchema,
        MessageDataSchema,
        MessageEnvelopeSchema,
    )),
    tags((name = "users", description = "User documents"))
)]
pub struct ApiDoc;
