//! API layer - HTTP endpoints and middleware

pub mod doc;
pub mod middleware;
pub mod router;
pub mod schemas;
pub mod state;
pub mod types;
pub mod users;

pub use router::{create_router, RouteSpec, ROUTES};
pub use state::AppState;
