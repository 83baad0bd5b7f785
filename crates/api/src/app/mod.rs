//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: the shared forecast model and analytics entry points
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{http::Method, Extension, Router};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::{ApiConfig, CorsPolicy};

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
///
/// Each call owns a fresh, untrained forecast model.
pub fn build_app(config: &ApiConfig) -> Router {
    let services = Arc::new(services::build_services());
    build_router(services, &config.cors)
}

/// Build the router around existing services.
pub fn build_router(services: Arc<services::AppServices>, cors: &CorsPolicy) -> Router {
    routes::router().layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(cors))
            .layer(Extension(services)),
    )
}

fn cors_layer(policy: &CorsPolicy) -> CorsLayer {
    match policy {
        CorsPolicy::AnyOrigin => CorsLayer::permissive(),
        CorsPolicy::Origins(origins) => CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins.iter().cloned()))
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any),
    }
}
