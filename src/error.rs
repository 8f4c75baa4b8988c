//! Scholia error types

use std::time::Duration;

/// Scholia error types
#[derive(Debug, thiserror::Error)]
pub enum ScholiaError {
    // Provider/network errors
    #[error("HTTP error: {0}")]
    Http(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("rate limited, retry after {retry_after:?}")]
    RateLimited { retry_after: Option<Duration> },

    #[error("authentication failed")]
    AuthenticationFailed,

    #[error("provider timed out after {0:?}")]
    Timeout(Duration),

    // Soft errors
    #[error("empty response from model")]
    EmptyResponse,

    // Data errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("malformed summary: {0}")]
    MalformedSummary(String),

    // Chain errors
    #[error("no provider configured")]
    NoProvider,

    /// Every provider in the chain was tried and none produced content.
    #[error("all {attempts} providers failed")]
    ChainExhausted { attempts: usize },

    // Configuration errors
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl ScholiaError {
    /// Map a non-success HTTP status to an error.
    pub fn from_status(status: u16, message: impl Into<String>, retry_after: Option<Duration>) -> Self {
        match status {
            401 | 403 => ScholiaError::AuthenticationFailed,
            429 => ScholiaError::RateLimited { retry_after },
            _ => ScholiaError::Api {
                status,
                message: message.into(),
            },
        }
    }

    /// Whether the failure is likely to clear up on its own.
    ///
    /// The chain advances on every failure regardless; this only feeds
    /// logging so operators can tell flaky providers from misconfigured ones.
    pub fn is_transient(&self) -> bool {
        match self {
            ScholiaError::Http(_)
            | ScholiaError::RateLimited { .. }
            | ScholiaError::Timeout(_)
            | ScholiaError::EmptyResponse => true,
            ScholiaError::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Provider-supplied back-off hint, if any.
    pub fn retry_after(&self) -> Option<Duration> {
        match self {
            ScholiaError::RateLimited { retry_after } => *retry_after,
            _ => None,
        }
    }
}

impl From<reqwest::Error> for ScholiaError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => ScholiaError::from_status(status.as_u16(), err.to_string(), None),
            None => ScholiaError::Http(err.to_string()),
        }
    }
}

/// Result type alias for Scholia operations
pub type Result<T> = std::result::Result<T, ScholiaError>;
