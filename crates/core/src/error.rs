//! Error types for the core domain.

use thiserror::Error;

/// Core domain error type.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid JSON: {0}")]
    MalformedJson(#[from] serde_json::Error),

    #[error("missing or invalid 'name' field in JSON")]
    MissingName,
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, Error>;
