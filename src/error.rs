//! Error types for TutorHub.

use thiserror::Error;

/// Common error type for TutorHub.
#[derive(Error, Debug)]
pub enum TutorHubError {
    /// Database error.
    ///
    /// Wraps errors from the storage backend; sqlx errors convert
    /// automatically.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Image thumbnail processing error.
    #[error("thumbnail error: {0}")]
    Thumbnail(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

impl From<sqlx::Error> for TutorHubError {
    fn from(e: sqlx::Error) -> Self {
        TutorHubError::Database(e.to_string())
    }
}

/// Result type alias for TutorHub operations.
pub type Result<T> = std::result::Result<T, TutorHubError>;
