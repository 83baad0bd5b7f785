use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use meditrack_ai::AiError;

pub fn ai_status(err: &AiError) -> StatusCode {
    match err {
        AiError::Data(_) => StatusCode::BAD_REQUEST,
        AiError::ModelNotTrained => StatusCode::CONFLICT,
        AiError::NumericFit(_) => StatusCode::UNPROCESSABLE_ENTITY,
    }
}

pub fn ai_error_to_response(err: AiError) -> axum::response::Response {
    json_error(ai_status(&err), err.kind(), err.to_string())
}

/// Training keeps its `{status, message}` envelope on failure too.
pub fn train_error_to_response(err: AiError) -> axum::response::Response {
    status_error(ai_status(&err), err.to_string())
}

pub fn rejection_to_response(rejection: JsonRejection) -> axum::response::Response {
    json_error(rejection.status(), "invalid_request", rejection.body_text())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

pub fn status_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "status": "error",
            "message": message.into(),
        })),
    )
        .into_response()
}
