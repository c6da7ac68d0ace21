//! Client error types

use shared::error::{AppError, ErrorCode};
use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// Connection failed or the request could not be sent
    #[error("Network error: {0}")]
    Network(reqwest::Error),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// Server answered with an error envelope
    #[error("API error {}: {}", .0.code, .0.message)]
    Api(AppError),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ClientError::Timeout
        } else if err.is_decode() {
            ClientError::InvalidResponse(err.to_string())
        } else {
            ClientError::Network(err)
        }
    }
}

impl ClientError {
    /// Error code when the server rejected the request
    pub fn code(&self) -> Option<ErrorCode> {
        match self {
            ClientError::Api(e) => Some(e.code),
            _ => None,
        }
    }

    /// Transient failures worth retrying
    pub fn is_retryable(&self) -> bool {
        match self {
            ClientError::Network(_) | ClientError::Timeout => true,
            ClientError::Api(e) => {
                matches!(e.code, ErrorCode::NetworkError | ErrorCode::TimeoutError)
            }
            _ => false,
        }
    }
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_errors_expose_code() {
        let err = ClientError::Api(AppError::group_full("company_group:a", 2));
        assert_eq!(err.code(), Some(ErrorCode::GroupFull));
        assert!(!err.is_retryable());
        assert!(err.to_string().contains("Group is full"));

        assert!(ClientError::Timeout.is_retryable());
        assert_eq!(ClientError::Timeout.code(), None);
    }
}
