//! Error types for cody-llm

use thiserror::Error;

/// LLM error type
#[derive(Debug, Error)]
pub enum Error {
    /// Provider not configured (missing API key)
    #[error("provider not configured: {0}")]
    NotConfigured(String),

    /// API returned a non-success status
    #[error("api error ({status}): {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Sanitized error body
        message: String,
    },

    /// Transport failure (connection refused, DNS, TLS, timeout)
    #[error("network error: {0}")]
    Network(String),

    /// Response body could not be interpreted
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// HTTP client could not be built
    #[error("provider error: {0}")]
    Provider(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
