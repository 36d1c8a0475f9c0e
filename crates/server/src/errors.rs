use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::ErrorBody;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

const INTERNAL_MESSAGE: &str = "Internal server error";

/// HTTP error rendered as `{"message": "..."}`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self { status, message: message.into() }
    }

    pub fn bad_request(message: impl Into<String>) -> Self { Self::new(StatusCode::BAD_REQUEST, message) }

    pub fn not_found(message: impl Into<String>) -> Self { Self::new(StatusCode::NOT_FOUND, message) }

    pub fn internal() -> Self { Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_MESSAGE) }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self {
        match e {
            ServiceError::Validation(_) | ServiceError::Model(_) => Self::bad_request(e.to_string()),
            ServiceError::NotFound(_) => Self::not_found(e.to_string()),
            ServiceError::Db(detail) => {
                error!(error = %detail, "database failure");
                Self::internal()
            }
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!(error = %rejection.body_text(), "rejected request body");
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody::new(self.message))).into_response()
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}
