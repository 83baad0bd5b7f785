use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/expiry-alerts", post(expiry_alerts))
        .route("/stock-recommendations", post(stock_recommendations))
}

pub async fn expiry_alerts(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::ExpiryAlertsRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    match services.expiry_alerts(&body.medicines) {
        Ok(alerts) => {
            (StatusCode::OK, Json(dto::ExpiryAlertsResponse { alerts })).into_response()
        }
        Err(e) => {
            tracing::warn!(
                kind = e.kind(),
                medicines = body.medicines.len(),
                "expiry evaluation failed: {e}"
            );
            errors::ai_error_to_response(e)
        }
    }
}

pub async fn stock_recommendations(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::StockRecommendationsRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    let recommendations = services.stock_recommendations(&body.medicines, &body.usage_history);
    (
        StatusCode::OK,
        Json(dto::StockRecommendationsResponse { recommendations }),
    )
        .into_response()
}
