// core/common/src/error.rs
// Standardized error responses and handling

use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cache::CacheError;
use crate::validation::ValidationError;

/// JSON body returned for every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub error_code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(error: String, error_code: String, message: String) -> Self {
        Self {
            error,
            error_code,
            message,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    // Client errors (4xx)
    #[error("{0}")]
    ValidationError(String),
    #[error("{0}")]
    MalformedQuery(String),
    #[error("{0}")]
    NotFound(String),

    // Server errors (5xx)
    #[error("Upstream request timed out: {0}")]
    UpstreamTimeout(String),
    #[error("Cache error: {0}")]
    CacheError(String),
    #[error("Database error: {0}")]
    DatabaseError(String),
    #[error("External service error: {0}")]
    ExternalServiceError(String),
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServiceError {
    /// Short human-readable title placed in the `error` field.
    pub fn title(&self) -> &'static str {
        match self {
            ServiceError::ValidationError(_) => "Missing required parameter",
            ServiceError::MalformedQuery(_) => "Invalid query string",
            ServiceError::NotFound(_) => "No data found",
            ServiceError::UpstreamTimeout(_) => "Gateway timeout",
            ServiceError::CacheError(_)
            | ServiceError::DatabaseError(_)
            | ServiceError::ExternalServiceError(_)
            | ServiceError::InternalError(_) => "Internal server error",
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::ValidationError(_) => "validation_error",
            ServiceError::MalformedQuery(_) => "malformed_query",
            ServiceError::NotFound(_) => "not_found",
            ServiceError::UpstreamTimeout(_) => "upstream_timeout",
            ServiceError::CacheError(_) => "cache_error",
            ServiceError::DatabaseError(_) => "database_error",
            ServiceError::ExternalServiceError(_) => "external_service_error",
            ServiceError::InternalError(_) => "internal_error",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ValidationError(_) | ServiceError::MalformedQuery(_) => StatusCode::BAD_REQUEST,
            ServiceError::NotFound(_) => StatusCode::NOT_FOUND,
            ServiceError::UpstreamTimeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ServiceError::CacheError(_)
            | ServiceError::DatabaseError(_)
            | ServiceError::ExternalServiceError(_)
            | ServiceError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn to_error_response(&self) -> ErrorResponse {
        ErrorResponse::new(
            self.title().to_string(),
            self.error_code().to_string(),
            self.to_string(),
        )
    }
}

impl ResponseError for ServiceError {
    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self.to_error_response())
    }

    fn status_code(&self) -> StatusCode {
        ServiceError::status_code(self)
    }
}

// Conversion from common error types
impl From<sqlx::Error> for ServiceError {
    fn from(err: sqlx::Error) -> Self {
        ServiceError::DatabaseError(err.to_string())
    }
}

impl From<CacheError> for ServiceError {
    fn from(err: CacheError) -> Self {
        ServiceError::CacheError(err.to_string())
    }
}

impl From<ValidationError> for ServiceError {
    fn from(err: ValidationError) -> Self {
        ServiceError::ValidationError(err.to_string())
    }
}
