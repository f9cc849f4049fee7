pub mod api;
pub mod config;
pub mod model;
pub mod store;

// Export API types
pub use api::handlers;
pub use api::routes;

// Export all model types
pub use model::*;

// Export store types
pub use store::{JsonFileStore, StoreError, VehicleStore};

use std::sync::Arc;

/// Router wired to the file store named in `config`
pub fn build_app(config: &crate::config::AppConfig) -> axum::Router {
    let store = Arc::new(JsonFileStore::from_config(&config.storage));
    api::routes::create_router().with_state(store)
}
