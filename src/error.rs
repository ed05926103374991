//! Error types for the catalog server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    /// The request body could not be decoded into the expected shape
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// No book carries the requested identifier
    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MalformedInput(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Bodies are fixed messages; decode details only reach the debug log.
        let message = match &self {
            AppError::MalformedInput(detail) => {
                tracing::debug!("Rejected request body: {}", detail);
                "Invalid request body"
            }
            AppError::NotFound(_) => "Book not found",
        };

        (self.status(), message).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
