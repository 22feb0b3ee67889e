//! API error types.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API error type.
///
/// Request-path errors are surfaced synchronously as an HTTP status with a
/// plain-text message; nothing is retried. Persister-path failures never
/// reach the client.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Forbidden: Invalid origin")]
    InvalidOrigin,

    #[error("Unable to read request body")]
    BodyRead,

    #[error("Invalid JSON")]
    MalformedJson,

    #[error("Missing or invalid 'name' field in JSON")]
    MissingName,
}

impl ApiError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidOrigin => StatusCode::FORBIDDEN,
            Self::BodyRead | Self::MalformedJson | Self::MissingName => StatusCode::BAD_REQUEST,
        }
    }
}

impl From<stash_core::Error> for ApiError {
    fn from(err: stash_core::Error) -> Self {
        match err {
            stash_core::Error::MalformedJson(_) => Self::MalformedJson,
            stash_core::Error::MissingName => Self::MissingName,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status_code(), self.to_string()).into_response()
    }
}

/// Result type for API handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(ApiError::InvalidOrigin.status_code(), StatusCode::FORBIDDEN);
        assert_eq!(ApiError::BodyRead.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ApiError::MalformedJson.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(ApiError::MissingName.status_code(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn core_errors_map_to_400s() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let mapped = ApiError::from(stash_core::Error::MalformedJson(parse_err));
        assert!(matches!(mapped, ApiError::MalformedJson));

        let mapped = ApiError::from(stash_core::Error::MissingName);
        assert!(matches!(mapped, ApiError::MissingName));
    }
}
