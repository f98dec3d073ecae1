//! Client error types

use thiserror::Error;

/// Client error type
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The proxy answered with `success: false`
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        details: Option<String>,
    },

    /// A list endpoint replaced a failed fetch with an empty list
    #[error("Upstream fetch failed: {0}")]
    Degraded(String),

    /// Invalid response format
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for client operations
pub type ClientResult<T> = Result<T, ClientError>;
