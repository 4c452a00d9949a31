//! Centralized API error handling
//!
//! A single error type for handler results, mapped onto HTTP status codes and
//! a JSON error body. Server-side variants only ever carry a fixed message;
//! driver errors are logged where they occur and never serialized.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::user::model::BLANK;

/// API error type with HTTP status code mapping
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Database error: {0}")]
    DatabaseError(String),
}

/// JSON error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in the response
#[derive(Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl ApiError {
    /// Get the error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::BadRequest(_) => "BAD_REQUEST",
            ApiError::ValidationError(_) => "VALIDATION_ERROR",
            ApiError::DatabaseError(_) => "DATABASE_ERROR",
        }
    }

    /// Get the HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::ValidationError(_) => StatusCode::BAD_REQUEST,
            ApiError::DatabaseError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// The message returned to the caller
    pub fn message(&self) -> &str {
        match self {
            ApiError::NotFound(msg)
            | ApiError::BadRequest(msg)
            | ApiError::ValidationError(msg)
            | ApiError::DatabaseError(msg) => msg,
        }
    }

    pub fn is_server_error(&self) -> bool {
        self.status_code().is_server_error()
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        if self.is_server_error() {
            tracing::error!(error = %self, code = %error_code, "Server error occurred");
        } else {
            tracing::debug!(error = %self, code = %error_code, "Client error occurred");
        }

        let body = ErrorResponse {
            error: ErrorDetails {
                code: error_code.to_string(),
                message: self.message().to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        // Field order in ValidationErrors is unspecified; sort for a stable message
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(msg) => msg.to_string(),
                    None if e.code == BLANK => format!("{} is required", field),
                    None => format!("{} is invalid", field),
                })
            })
            .collect();
        messages.sort();

        if messages.is_empty() {
            ApiError::ValidationError("Invalid input".to_string())
        } else {
            ApiError::ValidationError(messages.join(", "))
        }
    }
}

/// Result type alias using ApiError
pub type ApiResult<T> = Result<T, ApiError>;
