// Error handling types for the validator and its HTTP boundary

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::error;

use crate::validation::FieldErrors;

/// Failures that are not attributable to a single form field.
///
/// Field-level problems never show up here; they are recorded in
/// [`FieldErrors`] and inspected through `Validator::valid`.
#[derive(Debug, Error)]
pub enum FormError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Multipart error: {0}")]
    Multipart(String),

    #[error("Spill file error: {0}")]
    Spill(#[from] std::io::Error),
}

/// API error types
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    InternalServer(String),
    ValidationError(FieldErrors),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            ApiError::InternalServer(msg) => write!(f, "Internal Server Error: {}", msg),
            ApiError::ValidationError(fields) => {
                write!(f, "Validation Error: {}", fields.summary())
            }
        }
    }
}

/// JSON error response structure
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<FieldErrors>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_message, code, fields) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg, "BAD_REQUEST", None),
            ApiError::InternalServer(msg) => {
                error!(error = %msg, "Internal error while handling form");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    msg,
                    "INTERNAL_SERVER_ERROR",
                    None,
                )
            }
            ApiError::ValidationError(fields) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "One or more fields are invalid".to_string(),
                "VALIDATION_ERROR",
                Some(fields),
            ),
        };

        let error_response = ErrorResponse {
            error: error_message,
            code: code.to_string(),
            fields,
        };

        (status, Json(error_response)).into_response()
    }
}

impl From<FieldErrors> for ApiError {
    fn from(errors: FieldErrors) -> Self {
        if errors.is_empty() {
            ApiError::InternalServer(
                "Validation result was valid but converted to error".to_string(),
            )
        } else {
            ApiError::ValidationError(errors)
        }
    }
}

impl From<FormError> for ApiError {
    fn from(err: FormError) -> Self {
        match err {
            FormError::Multipart(msg) => ApiError::BadRequest(msg),
            other => ApiError::InternalServer(other.to_string()),
        }
    }
}
