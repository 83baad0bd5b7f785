use axum::{http::StatusCode, response::IntoResponse, Json};

pub const SERVICE_NAME: &str = "MediTrack AI Module";

pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "healthy",
            "service": SERVICE_NAME,
        })),
    )
}
