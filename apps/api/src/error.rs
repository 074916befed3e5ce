//! Error handling for the Murmur API
//!
//! A single error type covers guards, resolvers, the store and the context
//! builder. It maps onto HTTP status codes via Axum's `IntoResponse` and onto
//! GraphQL errors (with an `extensions.code`) via `ErrorExtensions`.

use async_graphql::ErrorExtensions;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for client-side handling
    pub code: &'static str,
    /// Human-readable error message
    pub message: String,
}

/// Main API error type
#[derive(Error, Debug)]
pub enum ApiError {
    // ========== Authentication & Authorization ==========
    /// No authenticated identity where one is required
    #[error("not logged in")]
    Unauthenticated,

    /// Token present but invalid or expired
    #[error("invalid authentication token: {0}")]
    InvalidToken(String),

    /// Identity present but lacks permission for the operation
    #[error("forbidden: {0}")]
    Forbidden(String),

    // ========== Resource Errors ==========
    /// Referenced entity does not exist
    #[error("{resource_type} {id} not found")]
    NotFound {
        resource_type: &'static str,
        id: String,
    },

    /// Entity already exists
    #[error("{resource_type} already exists: {id}")]
    Conflict {
        resource_type: &'static str,
        id: String,
    },

    // ========== Validation Errors ==========
    /// Unsupported argument value or wrong credentials
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // ========== Configuration Errors ==========
    /// Server wiring or settings are inconsistent
    #[error("configuration error: {0}")]
    Configuration(String),

    // ========== Internal Errors ==========
    /// Internal server error (catch-all for unexpected errors)
    #[error("internal server error: {0}")]
    Internal(String),

    /// JWT encoding error
    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),
}

impl ApiError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthenticated | Self::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict { .. } => StatusCode::CONFLICT,
            Self::InvalidArgument(_) => StatusCode::BAD_REQUEST,
            Self::Configuration(_) | Self::Internal(_) | Self::Jwt(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Get the error code string for client-side handling
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Unauthenticated => "UNAUTHENTICATED",
            Self::InvalidToken(_) => "INVALID_TOKEN",
            Self::Forbidden(_) => "FORBIDDEN",
            Self::NotFound { .. } => "NOT_FOUND",
            Self::Conflict { .. } => "CONFLICT",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
            Self::Jwt(_) => "JWT_ERROR",
        }
    }

    /// Create a not found error for a specific resource
    pub fn not_found(resource_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Create a conflict error for a specific resource
    pub fn conflict(resource_type: &'static str, id: impl ToString) -> Self {
        Self::Conflict {
            resource_type,
            id: id.to_string(),
        }
    }

    /// Message safe to hand back to clients
    ///
    /// Server-side failures are replaced with a generic message; the detail
    /// only goes to the log.
    pub fn public_message(&self) -> String {
        match self {
            Self::InvalidToken(_) => "Your session expired. Sign in again.".to_string(),
            _ if self.status_code().is_server_error() => {
                "An unexpected error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }

    /// Log the error with appropriate severity based on status code
    pub fn log(&self) {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Server error occurred"
            );
        } else if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            tracing::warn!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Authorization error"
            );
        } else {
            tracing::debug!(
                error = %self,
                code = self.error_code(),
                status = status.as_u16(),
                "Client error"
            );
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        self.log();

        let status = self.status_code();
        let error_response = ErrorResponse {
            code: self.error_code(),
            message: self.public_message(),
        };

        (status, Json(error_response)).into_response()
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> async_graphql::Error {
        self.log();

        let code = self.error_code();
        async_graphql::Error::new(self.public_message()).extend_with(|_, e| e.set("code", code))
    }
}

/// Result type alias for API operations
pub type ApiResult<T> = Result<T, ApiError>;

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::Internal(format!("background task failed: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::Unauthenticated.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::not_found("post", 5).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::InvalidArgument("unit".to_string()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::conflict("user", "a@test.com").status_code(),
            StatusCode::CONFLICT
        );
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(ApiError::Unauthenticated.error_code(), "UNAUTHENTICATED");
        assert_eq!(
            ApiError::Forbidden("not the author".to_string()).error_code(),
            "FORBIDDEN"
        );
        assert_eq!(ApiError::not_found("post", 5).error_code(), "NOT_FOUND");
    }

    #[test]
    fn test_error_display() {
        let err = ApiError::not_found("post", 5);
        assert_eq!(err.to_string(), "post 5 not found");
    }

    #[test]
    fn test_public_message_hides_internal_detail() {
        let err = ApiError::Internal("lock poisoned at store.rs:42".to_string());
        assert_eq!(err.public_message(), "An unexpected error occurred");

        let err = ApiError::InvalidToken("ExpiredSignature".to_string());
        assert_eq!(err.public_message(), "Your session expired. Sign in again.");
    }

    #[test]
    fn test_graphql_error_carries_code() {
        let err = ApiError::Forbidden("only the author can delete this post".to_string()).extend();
        let code = err
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(async_graphql::Value::String("FORBIDDEN".to_string())));
    }
}
