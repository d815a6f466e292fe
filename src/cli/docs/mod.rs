//! Documentation commands - route table and OpenAPI document

use utoipa::OpenApi;

use crate::api::doc::ApiDoc;
use crate::api::ROUTES;

/// Route table lines, `METHOD path -> handler`, aligned on the method column
pub fn route_lines() -> Vec<String> {
    ROUTES
        .iter()
        .map(|route| format!("{:<7} {} -> {}", route.method, route.path, route.handler))
        .collect()
}

pub fn print_routes() -> anyhow::Result<()> {
    for line in route_lines() {
        println!("{}", line);
    }
    Ok(())
}

pub fn print_openapi() -> anyhow::Result<()> {
    println!("{}", ApiDoc::openapi().to_pretty_json()?);
    Ok(())
}
