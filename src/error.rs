//! Application error type and its HTTP representation.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::dto::error::ErrorResponse;
use crate::application::services::StoreError;

/// Every failure a request can end in.
///
/// Each variant maps to one status code; the `Display` text becomes the
/// `error` field of the JSON body.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Shortening failed: {reason}")]
    Validation { reason: String },

    #[error("Could not parse request body as json")]
    MalformedRequest,

    #[error("Missing key '{field}' in request")]
    MissingField { field: &'static str },

    #[error("'{field}' must be a {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Not found")]
    NotFound,

    #[error("{message}")]
    Internal { message: &'static str },
}

impl AppError {
    pub fn validation(reason: impl ToString) -> Self {
        Self::Validation {
            reason: reason.to_string(),
        }
    }

    pub fn missing_field(field: &'static str) -> Self {
        Self::MissingField { field }
    }

    pub fn wrong_type(field: &'static str, expected: &'static str) -> Self {
        Self::WrongType { field, expected }
    }

    /// A value the handler relies on was never produced by an earlier stage.
    pub fn misconfigured() -> Self {
        Self::Internal {
            message: "Misconfigured handler",
        }
    }

    pub fn internal(message: &'static str) -> Self {
        Self::Internal { message }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation { .. }
            | AppError::MalformedRequest
            | AppError::MissingField { .. }
            | AppError::WrongType { .. } => StatusCode::BAD_REQUEST,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::InvalidUrl(reason) => AppError::validation(reason),
            StoreError::NotFound(_) => AppError::NotFound,
            StoreError::CodeSpaceExhausted { .. } => {
                AppError::internal("Failed to generate unique code")
            }
            StoreError::LockPoisoned => AppError::internal("Internal server error"),
        }
    }
}
