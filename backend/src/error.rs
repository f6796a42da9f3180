//! Error handling for the Business Administration Platform
//!
//! Errors carry an English message for logs and a Vietnamese message for
//! the client; responses use the dashboard's `{success, message}` envelope.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use shared::ApiResponse;
use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error: {message}")]
    Validation {
        field: String,
        message: String,
        message_vi: String,
    },

    // Lookup failures
    #[error("Resource not found: {message}")]
    NotFound {
        message: String,
        message_vi: String,
    },

    // Business conflicts
    #[error("Conflict: {message}")]
    Conflict {
        message: String,
        message_vi: String,
    },

    // Database errors
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    // Internal errors
    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Internal server error")]
    InternalError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::Validation { message_vi, .. } => {
                (StatusCode::BAD_REQUEST, message_vi.clone())
            }
            AppError::NotFound { message_vi, .. } => (StatusCode::NOT_FOUND, message_vi.clone()),
            AppError::Conflict { message_vi, .. } => (StatusCode::CONFLICT, message_vi.clone()),
            AppError::DatabaseError(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Lỗi hệ thống, vui lòng thử lại sau".to_string(),
            ),
            AppError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg.clone()),
            AppError::InternalError(err) => (StatusCode::INTERNAL_SERVER_ERROR, err.to_string()),
        };

        // Log the error for debugging
        tracing::error!("Error: {:?}", self);

        (status, Json(ApiResponse::<()>::error(message))).into_response()
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
