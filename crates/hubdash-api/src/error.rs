use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use hubdash_core::error::DomainError;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("System information unavailable: {0}")]
    SystemInfo(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type, message, details) = match self {
            ApiError::Unauthorized(msg) => {
                tracing::warn!("Unauthorized: {}", msg);
                (StatusCode::UNAUTHORIZED, "SESSION_EXPIRED", msg, None)
            }
            ApiError::InvalidCredentials => {
                tracing::warn!("Login rejected: invalid credentials");
                (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_CREDENTIALS",
                    "Invalid username or password".to_string(),
                    None,
                )
            }
            ApiError::Forbidden(msg) => {
                tracing::warn!("Forbidden: {}", msg);
                (StatusCode::FORBIDDEN, "Forbidden", msg, None)
            }
            ApiError::NotFound(msg) => {
                tracing::warn!("Not found: {}", msg);
                (StatusCode::NOT_FOUND, "NotFound", msg, None)
            }
            ApiError::BadRequest(msg) => {
                tracing::warn!("Bad request: {}", msg);
                (StatusCode::BAD_REQUEST, "BadRequest", msg, None)
            }
            ApiError::SystemInfo(details) => {
                tracing::error!("System information unavailable: {}", details);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "failed to collect system information",
                    "failed to collect system information".to_string(),
                    Some(details),
                )
            }
            ApiError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "InternalError", msg, None)
            }
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
            details,
        });

        (status, body).into_response()
    }
}

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::MenuItemNotFound(_) | DomainError::DocumentNotFound(_) => {
                ApiError::NotFound(err.to_string())
            }
            DomainError::DocumentNotPublished(_) => ApiError::Forbidden(err.to_string()),
            DomainError::InvalidDomain(_)
            | DomainError::InvalidTestKind(_)
            | DomainError::ValidationError(_) => ApiError::BadRequest(err.to_string()),
            DomainError::SystemInfoUnavailable(details) => ApiError::SystemInfo(details),
            DomainError::ProbeTimeout
            | DomainError::ProbeFailed(_)
            | DomainError::DatabaseError(_)
            | DomainError::StorageError(_)
            | DomainError::InternalError(_) => ApiError::InternalError(err.to_string()),
        }
    }
}
