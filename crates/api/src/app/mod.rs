//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: catalog store and query facade wiring
//! - `routes/`: HTTP routes + handlers
//! - `dto.rs`: query-string DTOs and JSON mapping helpers
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower::ServiceBuilder;

use productlist_infra::{AppConfig, ProductRepository};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router over the configured JSON dataset (used by `main.rs`).
pub fn build_app(config: &AppConfig) -> Router {
    router(services::build_services(config))
}

/// Build the same router over an arbitrary catalog store.
pub fn build_app_with_repository(repository: Arc<dyn ProductRepository>) -> Router {
    router(services::AppServices::new(repository))
}

fn router(services: services::AppServices) -> Router {
    let services = Arc::new(services);

    Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router().layer(Extension(services)))
        .layer(ServiceBuilder::new())
}
