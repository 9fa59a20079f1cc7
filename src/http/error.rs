//! HTTP error handling and response types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::db::RepositoryError;
use crate::services::ServiceError;

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

/// Application error type for HTTP handlers. Wraps the service error kinds
/// and translates each to a status code; services classify, handlers only
/// translate.
#[derive(Debug)]
pub struct AppError(pub ServiceError);

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        AppError(err)
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError(ServiceError::Repository(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = match self.0 {
            ServiceError::NotFound(msg) => {
                (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", msg))
            }
            ServiceError::Forbidden(msg) => {
                (StatusCode::FORBIDDEN, ApiError::new("FORBIDDEN", msg))
            }
            ServiceError::Conflict(msg) => {
                (StatusCode::CONFLICT, ApiError::new("CONFLICT", msg))
            }
            ServiceError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, ApiError::new("BAD_REQUEST", msg))
            }
            // Aliased to 500 at the boundary; the kind survives in `code`.
            ServiceError::PreconditionFailed(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("PRECONDITION_FAILED", msg),
            ),
            ServiceError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiError::new("INTERNAL_ERROR", msg),
            ),
            ServiceError::Repository(e) => {
                if e.is_not_found() {
                    (StatusCode::NOT_FOUND, ApiError::new("NOT_FOUND", e.to_string()))
                } else if e.is_conflict() {
                    (StatusCode::CONFLICT, ApiError::new("CONFLICT", e.to_string()))
                } else {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        ApiError::new("REPOSITORY_ERROR", e.to_string()),
                    )
                }
            }
        };

        (status, Json(error)).into_response()
    }
}
