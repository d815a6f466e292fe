//! Users API
//!
//! A CRUD HTTP service over a single collection of user documents:
//! - Create, read, replace, delete and list users
//! - A uniform `{status, message, data}` envelope on every response
//! - PostgreSQL (JSONB documents) or in-memory storage

pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::AppConfig;

use tracing::info;

use api::state::AppState;
use domain::User;
use infrastructure::storage::{StorageConfig, StorageFactory};
use infrastructure::user::UserService;

/// Opens the configured document store and wires the user service.
///
/// Fails when the connection string is missing, the store is unreachable or
/// the liveness check fails; there is no retry.
pub async fn create_app_state_with_config(config: &AppConfig) -> anyhow::Result<AppState> {
    let storage_config = StorageConfig::from_database_config(&config.database)?;
    info!(
        backend = ?storage_config.backend(),
        collection = %config.database.collection,
        "Opening document store"
    );

    let storage =
        StorageFactory::create::<User>(&storage_config, &config.database.collection).await?;

    Ok(AppState::new(UserService::new(storage)))
}
