//! Internal error types for argus-reqwest.

use thiserror::Error;

/// Result type alias for argus-reqwest operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for argus-reqwest operations.
#[derive(Debug, Error)]
pub enum Error {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Reqwest(#[from] reqwest::Error),
    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// Input could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The service answered with a non-success status.
    #[error("API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Message extracted from the response body, if any.
        message: String,
    },
    /// The service answered 2xx but the body did not match the contract.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    /// The input media type is not supported.
    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Creates an API error from a status code and message.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Creates an invalid response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }

    /// Creates an unsupported media error.
    pub fn unsupported_media(message: impl Into<String>) -> Self {
        Self::UnsupportedMedia(message.into())
    }

    /// Creates a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether a retry may succeed for this error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Reqwest(e) => e.is_timeout() || e.is_connect(),
            Self::Api { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }
}

impl From<Error> for argus_core::Error {
    fn from(err: Error) -> Self {
        match err {
            Error::Reqwest(e) => {
                if e.is_timeout() {
                    argus_core::Error::timeout()
                        .with_message("Request timed out")
                        .with_source(e)
                } else if e.is_connect() {
                    argus_core::Error::network_error()
                        .with_message("Connection failed")
                        .with_source(e)
                } else {
                    argus_core::Error::network_error()
                        .with_message(e.to_string())
                        .with_source(e)
                }
            }
            Error::Serde(e) => argus_core::Error::serialization()
                .with_message(e.to_string())
                .with_source(e),
            Error::Io(e) => argus_core::Error::invalid_input()
                .with_message(e.to_string())
                .with_source(e),
            Error::Api { status, message } => {
                let error = match status {
                    404 => argus_core::Error::not_found(),
                    400 | 422 => argus_core::Error::invalid_input(),
                    429 => argus_core::Error::rate_limited(),
                    408 | 504 => argus_core::Error::timeout(),
                    502 | 503 => argus_core::Error::service_unavailable(),
                    _ => argus_core::Error::external_error(),
                };
                error.with_message(format!("status {status}: {message}"))
            }
            Error::InvalidResponse(message) => {
                argus_core::Error::serialization().with_message(message)
            }
            Error::UnsupportedMedia(message) => {
                argus_core::Error::invalid_input().with_message(message)
            }
            Error::Config(message) => argus_core::Error::configuration().with_message(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use argus_core::ErrorKind;

    use super::*;

    #[test]
    fn test_retryable_statuses() {
        assert!(Error::api(429, "slow down").is_retryable());
        assert!(Error::api(503, "overloaded").is_retryable());
        assert!(!Error::api(404, "unknown model").is_retryable());
        assert!(!Error::api(422, "bad request").is_retryable());
        assert!(!Error::invalid_response("truncated body").is_retryable());
    }

    #[test]
    fn test_taxonomy_mapping() {
        let mapped: argus_core::Error = Error::api(404, "unknown model 'x'").into();
        assert_eq!(mapped.kind(), ErrorKind::NotFound);

        let mapped: argus_core::Error = Error::api(503, "unavailable").into();
        assert_eq!(mapped.kind(), ErrorKind::ServiceUnavailable);

        let mapped: argus_core::Error = Error::invalid_response("not json").into();
        assert_eq!(mapped.kind(), ErrorKind::Serialization);

        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let mapped: argus_core::Error = Error::Io(io).into();
        assert_eq!(mapped.kind(), ErrorKind::InvalidInput);

        let mapped: argus_core::Error = Error::unsupported_media("extension 'txt'").into();
        assert_eq!(mapped.kind(), ErrorKind::InvalidInput);
    }
}
