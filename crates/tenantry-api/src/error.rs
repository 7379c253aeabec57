//! Error types for the organization API.

use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tenantry_core::error::TenantryError;
use thiserror::Error;

/// Errors surfaced to API clients.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid input, duplicate name or collection clash.
    #[error("{0}")]
    BadRequest(String),

    /// Missing, malformed or rejected credentials.
    #[error("{0}")]
    Unauthorized(String),

    /// Token holder may not act on the requested organization.
    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    /// Anything unanticipated. The message is logged, not returned.
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<TenantryError> for ApiError {
    fn from(err: TenantryError) -> Self {
        match err {
            TenantryError::NotFound { .. } => ApiError::NotFound(err.to_string()),
            TenantryError::AuthenticationFailed { .. } => ApiError::Unauthorized(err.to_string()),
            TenantryError::Forbidden { .. } => ApiError::Forbidden(err.to_string()),
            TenantryError::Validation { message } => ApiError::BadRequest(message),
            err if err.is_client_error() => ApiError::BadRequest(err.to_string()),
            err => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match self {
            ApiError::Internal(message) => {
                tracing::error!(error = %message, "Request failed");
                "Internal server error".to_string()
            }
            ApiError::BadRequest(detail)
            | ApiError::Unauthorized(detail)
            | ApiError::Forbidden(detail)
            | ApiError::NotFound(detail) => detail,
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
