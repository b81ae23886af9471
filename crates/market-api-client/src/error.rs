//! Error taxonomy for API calls.

use thiserror::Error;

/// Message for a response body that is not JSON (or not the expected shape).
pub const INVALID_RESPONSE_MESSAGE: &str = "Invalid response from server";

/// Which layer a failure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Transport failure: connection refused, DNS, timeout, cancellation.
    NetworkError,
    /// The server answered with something that is not the expected JSON.
    ProtocolError,
    /// The server answered with a non-success status.
    ApiError,
    /// A client-side form rule failed; nothing was sent.
    ValidationError,
}

/// A recoverable failure of a client operation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("{0}")]
    Protocol(String),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("{0}")]
    Validation(String),
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::Network(_) => ErrorKind::NetworkError,
            ApiError::Protocol(_) => ErrorKind::ProtocolError,
            ApiError::Api { .. } => ErrorKind::ApiError,
            ApiError::Validation(_) => ErrorKind::ValidationError,
        }
    }

    /// The user-facing message.
    pub fn message(&self) -> &str {
        match self {
            ApiError::Network(m) | ApiError::Protocol(m) | ApiError::Validation(m) => m,
            ApiError::Api { message, .. } => message,
        }
    }

    /// HTTP status for `ApiError::Api`.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub(crate) fn invalid_response() -> Self {
        ApiError::Protocol(INVALID_RESPONSE_MESSAGE.to_string())
    }
}

/// Result type for client operations.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_and_message() {
        let err = ApiError::Api {
            status: 401,
            message: "bad creds".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::ApiError);
        assert_eq!(err.message(), "bad creds");
        assert_eq!(err.status(), Some(401));
        assert_eq!(err.to_string(), "bad creds");

        let err = ApiError::invalid_response();
        assert_eq!(err.kind(), ErrorKind::ProtocolError);
        assert_eq!(err.message(), INVALID_RESPONSE_MESSAGE);
        assert_eq!(err.status(), None);

        assert_eq!(
            ApiError::Network("connection refused".into()).kind(),
            ErrorKind::NetworkError
        );
        assert_eq!(
            ApiError::Validation("Please fix the errors above".into()).kind(),
            ErrorKind::ValidationError
        );
    }
}
