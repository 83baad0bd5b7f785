use axum::{routing::get, Router};

pub mod analytics;
pub mod forecast;
pub mod system;

/// Router for every analytics endpoint.
pub fn router() -> Router {
    Router::new()
        .route("/health", get(system::health))
        .nest("/api/forecast", forecast::router())
        .nest("/api/analytics", analytics::router())
}
