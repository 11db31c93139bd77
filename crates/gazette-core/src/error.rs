use thiserror::Error;

/// Application-wide error types for Gazette.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload is missing a field or carries an invalid value.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Credentials were rejected or no valid session is present.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Upstream CMS answered with something we cannot use.
    #[error("Upstream error: {0}")]
    Upstream(String),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    HttpError(String),

    /// Request timed out.
    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    /// Network/connection error.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Database operation failed.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Missing or invalid configuration.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Session token could not be minted.
    #[error("Session error: {0}")]
    SessionError(String),

    /// JSON serialization/deserialization failed.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Generic error.
    #[error("{0}")]
    Generic(String),
}
