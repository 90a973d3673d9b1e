use reqwest::StatusCode;
use thiserror::Error;

/// API-specific errors
#[derive(Error, Debug)]
pub enum ApiError {
    /// No response reached us
    #[error("Backend unavailable: {0}")]
    Transport(String),

    /// Token missing, invalid or expired; the session has been cleared
    #[error("Session expired: {0}")]
    SessionExpired(String),

    #[error("Access forbidden: {0}")]
    Forbidden(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Server error: {0}")]
    ServerError(String),

    /// Response body did not match the expected shape
    #[error("Unexpected response format: {0}")]
    Format(String),

    #[error("Invalid identifier: {0}")]
    InvalidId(String),

    #[error("Session storage error: {0}")]
    Storage(String),

    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl ApiError {
    pub fn from_status(status: StatusCode, message: String) -> Self {
        let msg = if message.is_empty() {
            status.canonical_reason().unwrap_or("Unknown error").to_string()
        } else {
            message
        };

        match status {
            StatusCode::UNAUTHORIZED => ApiError::SessionExpired(msg),
            StatusCode::FORBIDDEN => ApiError::Forbidden(msg),
            StatusCode::NOT_FOUND => ApiError::NotFound(msg),
            StatusCode::UNPROCESSABLE_ENTITY => ApiError::Validation(msg),
            StatusCode::BAD_REQUEST => ApiError::BadRequest(msg),
            status if status.is_server_error() => ApiError::ServerError(msg),
            status if status.is_client_error() => ApiError::BadRequest(msg),
            _ => ApiError::Unknown(msg),
        }
    }

    /// Whether a read path may substitute mock data for this failure.
    ///
    /// Everything except an expired session qualifies: that one has to end in
    /// a fresh login, not in stale fixtures.
    pub fn allows_fallback(&self) -> bool {
        !matches!(self, ApiError::SessionExpired(_))
    }

    pub fn is_unavailable(&self) -> bool {
        matches!(self, ApiError::Transport(_))
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ApiError::Format(err.to_string())
        } else {
            ApiError::Transport(err.to_string())
        }
    }
}
