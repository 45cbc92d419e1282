use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use crate::RequestError;

/// Errors surfaced to HTTP callers as `{"detail": message}`
#[derive(Debug)]
pub enum ApiError {
    NotFound,
    InvalidRequest(String),
    MalformedBody { status: StatusCode, message: String },
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::NotFound => (StatusCode::NOT_FOUND, "Job not found".to_string()),
            ApiError::InvalidRequest(message) => (StatusCode::UNPROCESSABLE_ENTITY, message),
            ApiError::MalformedBody { status, message } => (status, message),
        };

        (status, Json(json!({ "detail": detail }))).into_response()
    }
}

impl From<RequestError> for ApiError {
    fn from(err: RequestError) -> Self {
        Self::InvalidRequest(err.to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::MalformedBody {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}
