//! Error types for the persistence gateway.

use thiserror::Error;

/// Errors that can occur while submitting records.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GatewayError {
    /// The HTTP client could not be built or the request failed in transit.
    #[error("network error: {0}")]
    Network(String),

    /// The endpoint answered with a non-success status.
    #[error("storage endpoint returned {status}: {message}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        message: String,
    },

    /// The endpoint answered with a body that is not JSON.
    #[error("invalid response body: {0}")]
    InvalidResponse(String),

    /// The background submission thread panicked.
    #[error("submission thread panicked")]
    Panicked,
}

impl GatewayError {
    /// Returns a user-friendly error message suitable for display in the UI.
    #[must_use]
    pub fn user_message(&self) -> &str {
        match self {
            Self::Network(_) => "Could not reach the storage endpoint.",
            Self::Status { .. } => "The storage endpoint rejected the data.",
            Self::InvalidResponse(_) => "The storage endpoint sent an unexpected response.",
            Self::Panicked => "An unexpected error occurred.",
        }
    }

    /// Returns whether re-invoking save may succeed.
    #[must_use]
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network(_) => true,
            Self::Status { status, .. } => *status >= 500,
            Self::InvalidResponse(_) | Self::Panicked => false,
        }
    }
}

impl From<reqwest::Error> for GatewayError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
