use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::{self, AppServices};
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/train", post(train))
        .route("/predict", post(predict))
        .route("/model", get(model_summary))
}

pub async fn train(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::TrainRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => return errors::status_error(rejection.status(), rejection.body_text()),
    };

    match services.train(body.historical_data).await {
        Ok(report) => (StatusCode::OK, Json(dto::TrainResponse::from(report))).into_response(),
        Err(e) => {
            tracing::warn!(kind = e.kind(), "train request failed: {e}");
            errors::train_error_to_response(e)
        }
    }
}

pub async fn predict(
    Extension(services): Extension<Arc<AppServices>>,
    body: Result<Json<dto::PredictRequest>, JsonRejection>,
) -> axum::response::Response {
    let body = match body {
        Ok(Json(b)) => b,
        Err(rejection) => return errors::rejection_to_response(rejection),
    };

    let features = match body.into_features(services::today()) {
        Ok(f) => f,
        Err(e) => return errors::ai_error_to_response(e),
    };

    match services.predict(&features) {
        Ok(predicted_demand) => {
            (StatusCode::OK, Json(dto::PredictResponse { predicted_demand })).into_response()
        }
        Err(e) => {
            tracing::debug!(kind = e.kind(), "predict request failed: {e}");
            errors::ai_error_to_response(e)
        }
    }
}

pub async fn model_summary(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    (StatusCode::OK, Json(services.model_summary())).into_response()
}
