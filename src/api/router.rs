use axum::{
    middleware,
    routing::{get, post, MethodRouter},
    Router,
};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use super::doc::{ApiDoc, OPENAPI_JSON_PATH, SWAGGER_UI_PATH};
use super::middleware::logging_middleware;
use super::state::AppState;
use super::users;

/// One entry of the static route table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteSpec {
    pub method: &'static str,
    pub path: &'static str,
    pub handler: &'static str,
}

/// Every user route served by [`create_router`]
pub const ROUTES: &[RouteSpec] = &[
    RouteSpec {
        method: "POST",
        path: "/users",
        handler: "create_user",
    },
    RouteSpec {
        method: "GET",
        path: "/users/{user_id}",
        handler: "get_user",
    },
    RouteSpec {
        method: "PUT",
        path: "/users/{user_id}",
        handler: "update_user",
    },
    RouteSpec {
        method: "DELETE",
        path: "/users/{user_id}",
        handler: "delete_user",
    },
    RouteSpec {
        method: "GET",
        path: "/users",
        handler: "list_users",
    },
];

/// Create the full router with application state.
///
/// Each user route also answers with a trailing slash.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/users", collection_routes())
        .route("/users/", collection_routes())
        .route("/users/{user_id}", member_routes())
        .route("/users/{user_id}/", member_routes())
        .merge(SwaggerUi::new(SWAGGER_UI_PATH).url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .with_state(state)
        .layer(middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
}

fn collection_routes() -> MethodRouter<AppState> {
    post(users::create_user).get(users::list_users)
}

fn member_routes() -> MethodRouter<AppState> {
    get(users::get_user)
        .put(users::update_user)
        .delete(users::delete_user)
}
