//! Unified error type for the platform
//!
//! Every boundary error maps to one variant here; [`IntoResponse`] turns it
//! into the standard `{success: false, message}` envelope with the right
//! HTTP status. Database and internal errors are logged and surfaced as
//! generic 500s without leaking detail.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::response::ApiResponse;

/// Unified error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing input
    #[error("{message}")]
    Validation { message: String },

    /// Unresolvable id or number
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// Referenced product is disabled
    #[error("{resource} is not available")]
    Unavailable { resource: String },

    /// Illegal status transition or terminal-state mutation
    #[error("{message}")]
    InvalidState { message: String },

    /// Authentication required or credentials rejected
    #[error("{message}")]
    Unauthorized { message: String },

    /// Invalid token
    #[error("Invalid token: {message}")]
    InvalidToken { message: String },

    /// Token expired
    #[error("Token expired")]
    TokenExpired,

    /// Permission denied
    #[error("Permission denied: {message}")]
    Forbidden { message: String },

    /// Database error
    #[error("Database error: {message}")]
    Database { message: String },

    /// Internal server error
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl ApiError {
    // ========== Convenient constructors ==========

    /// Create a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an Unauthorized error
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    /// Create a NotFound error
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Create an Unavailable error
    pub fn unavailable(resource: impl Into<String>) -> Self {
        Self::Unavailable {
            resource: resource.into(),
        }
    }

    /// Create an InvalidState error
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }

    /// Create an InvalidToken error
    pub fn invalid_token(message: impl Into<String>) -> Self {
        Self::InvalidToken {
            message: message.into(),
        }
    }

    /// Create a Forbidden error
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Forbidden {
            message: message.into(),
        }
    }

    /// Create a Database error
    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Create an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Unavailable { .. } => StatusCode::BAD_REQUEST,
            Self::InvalidState { .. } => StatusCode::BAD_REQUEST,
            Self::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            Self::InvalidToken { .. } => StatusCode::UNAUTHORIZED,
            Self::TokenExpired => StatusCode::UNAUTHORIZED,
            Self::Forbidden { .. } => StatusCode::FORBIDDEN,
            Self::Database { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message surfaced to the client
    ///
    /// Database/internal detail never leaves the process.
    pub fn client_message(&self) -> String {
        match self {
            Self::Database { .. } => "Database error".to_string(),
            Self::Internal { .. } => "Internal server error".to_string(),
            other => other.to_string(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        match &self {
            ApiError::Database { message } => {
                tracing::error!(target: "database", error = %message, "Database error occurred");
            }
            ApiError::Internal { message } => {
                tracing::error!(target: "internal", error = %message, "Internal error occurred");
            }
            _ => {}
        }

        let body = Json(ApiResponse::<()>::error(self.client_message()));
        (status, body).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_mapping_follows_the_taxonomy() {
        assert_eq!(
            ApiError::validation("bad").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::not_found("Order").status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::unavailable("X-Burguer").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::invalid_state("done").status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::unauthorized("Authentication required").status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::forbidden("nope").status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::database("boom").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn internal_detail_is_not_leaked() {
        let err = ApiError::database("connection refused at 127.0.0.1:8000");
        assert_eq!(err.client_message(), "Database error");

        let err = ApiError::internal("stack trace here");
        assert_eq!(err.client_message(), "Internal server error");

        let err = ApiError::unavailable("X-Burguer");
        assert_eq!(err.client_message(), "X-Burguer is not available");
    }
}
