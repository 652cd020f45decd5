//! Error types for the Newsdesk clients

use thiserror::Error;

/// Result type alias for assistant client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to the assistant service
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if this error is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ApiError { status: 404, .. })
    }

    /// Check if this error is a client error (4xx status)
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 400 && *status < 500)
    }

    /// Check if this error is a server error (5xx status)
    pub fn is_server_error(&self) -> bool {
        matches!(self, Self::ApiError { status, .. } if *status >= 500)
    }

    /// Check if retrying the same request may succeed
    ///
    /// Transport failures, rate limiting (429) and server errors are
    /// transient. Other client errors and unparseable bodies are not.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::RequestFailed(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            Self::ApiError { status: 429, .. } => true,
            Self::ApiError { .. } => self.is_server_error(),
            Self::ParseError(_) | Self::InvalidRequest(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rate_limit_and_server_errors_are_transient() {
        assert!(ClientError::api_error(429, "slow down").is_transient());
        assert!(ClientError::api_error(500, "boom").is_transient());
        assert!(ClientError::api_error(503, "unavailable").is_transient());
    }

    #[test]
    fn test_client_and_parse_errors_are_fatal() {
        assert!(!ClientError::api_error(400, "bad").is_transient());
        assert!(!ClientError::api_error(404, "missing").is_transient());
        assert!(!ClientError::ParseError("eof".to_string()).is_transient());
    }

    #[test]
    fn test_status_classification() {
        let err = ClientError::api_error(404, "missing");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert!(!err.is_server_error());
    }
}
