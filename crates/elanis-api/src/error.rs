//! Error types for Elanis API operations.

use thiserror::Error;

/// Result type for Elanis API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Errors that can occur while talking to the Elanis API.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ApiError {
    /// Non-success HTTP status surfaced after envelope handling.
    #[error("HTTP error {status}: {message}")]
    Http { status: u16, message: String },

    /// The server answered 2xx but reported `succeeded: false`.
    #[error("request rejected: {message}")]
    Api {
        message: String,
        errors: Vec<String>,
    },

    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("no refresh token available")]
    RefreshUnavailable,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("operation timed out")]
    Timeout,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ApiError {
    /// Build the `succeeded: false` rejection from an envelope.
    pub fn rejected(message: Option<String>, errors: Option<Vec<String>>) -> Self {
        ApiError::Api {
            message: message.unwrap_or_else(|| "request rejected by server".to_string()),
            errors: errors.unwrap_or_default(),
        }
    }

    /// Check if this error means the caller's credentials were rejected.
    #[inline]
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        match self {
            ApiError::AuthenticationFailed(_) | ApiError::RefreshUnavailable => true,
            ApiError::Http { status, .. } => *status == 401 || *status == 403,
            _ => false,
        }
    }

    /// Check if this error came from the network rather than the server.
    #[inline]
    #[must_use]
    pub fn is_transport(&self) -> bool {
        matches!(self, ApiError::Transport(_) | ApiError::Timeout)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_401_is_auth_failure() {
        let err = ApiError::Http {
            status: 401,
            message: "Unauthorized".into(),
        };
        assert!(err.is_auth_failure());
    }

    #[test]
    fn test_http_500_is_not_auth_failure() {
        let err = ApiError::Http {
            status: 500,
            message: "Server Error".into(),
        };
        assert!(!err.is_auth_failure());
    }

    #[test]
    fn test_refresh_unavailable_is_auth_failure() {
        assert!(ApiError::RefreshUnavailable.is_auth_failure());
    }

    #[test]
    fn test_timeout_is_transport() {
        assert!(ApiError::Timeout.is_transport());
        assert!(!ApiError::Timeout.is_auth_failure());
    }

    #[test]
    fn test_rejected_defaults() {
        let err = ApiError::rejected(None, None);
        match err {
            ApiError::Api { message, errors } => {
                assert_eq!(message, "request rejected by server");
                assert!(errors.is_empty());
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
