/// Error types for Blog Service
///
/// Every page handler returns `Result<HttpResponse>`; errors are turned into
/// rendered HTML pages by the `ResponseError` implementation below.
use crate::templates;
use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use thiserror::Error;

/// Result type for blog-service operations
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    /// Slug or tag lookup missed
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write rejected by an integrity rule (staff author, tag count, ...)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Duplicate resource (tag title collision)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        AppError::NotFound(what.into())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();

        let markup = match self {
            AppError::NotFound(what) => {
                tracing::debug!(%what, "page not found");
                templates::not_found()
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error while rendering page");
                templates::error_page(status, "The page could not be loaded.")
            }
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error while rendering page");
                templates::error_page(status, "The page could not be loaded.")
            }
            AppError::Validation(msg) | AppError::Conflict(msg) => {
                tracing::warn!(error = %msg, "rejected request");
                templates::error_page(status, msg)
            }
        };

        HttpResponse::build(status)
            .content_type(mime::TEXT_HTML_UTF_8)
            .body(markup.into_string())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Validation(errors.to_string())
    }
}

impl From<String> for AppError {
    fn from(msg: String) -> Self {
        AppError::Internal(msg)
    }
}

impl From<&str> for AppError {
    fn from(msg: &str) -> Self {
        AppError::Internal(msg.to_string())
    }
}
