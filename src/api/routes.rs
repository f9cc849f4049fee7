use axum::{routing::get, Router};
use std::sync::Arc;

use crate::api::{docs_handlers, handlers};
use crate::store::VehicleStore;

pub fn create_router<S: VehicleStore + 'static>() -> Router<Arc<S>> {
    Router::new()
        .route("/", get(handlers::welcome))
        // Health check
        .route("/health", get(handlers::health_check))
        // API Documentation
        .route("/docs", get(docs_handlers::get_api_docs))
        .route("/docs/openapi.json", get(docs_handlers::get_openapi_spec))
        // Vehicle collection
        .route(
            "/vehiculos",
            get(handlers::list_vehicles::<S>).post(handlers::create_vehicle::<S>),
        )
        .route(
            "/vehiculos/id/:id",
            get(handlers::get_vehicle::<S>)
                .put(handlers::update_vehicle::<S>)
                .delete(handlers::delete_vehicle::<S>),
        )
}
