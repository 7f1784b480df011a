//! Error types for cody-tools

use crate::doctor::{FailureCategory, Operation};
use thiserror::Error;

/// Tool error type
#[derive(Debug, Error)]
pub enum Error {
    /// Executable could not be found on the search path
    #[error("command not found: {0}")]
    NotFound(String),

    /// Process ran and exited with a non-zero status
    #[error("`{command}` exited with status {code}: {stderr}")]
    Failed {
        /// Rendered command line
        command: String,
        /// Exit code (-1 when terminated by a signal)
        code: i32,
        /// Captured standard error
        stderr: String,
    },

    /// Process did not finish in time
    #[error("timeout after {0}ms")]
    Timeout(u64),

    /// Invalid input
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Toolchain operation failed with a classified cause
    #[error("{operation} failed ({category}): {detail}")]
    Toolchain {
        /// Operation that failed
        operation: Operation,
        /// Classified cause
        category: FailureCategory,
        /// Captured diagnostic text
        detail: String,
    },

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Captured diagnostic text for failures that carry one
    #[must_use]
    pub fn diagnostic(&self) -> String {
        match self {
            Self::Failed { stderr, .. } => stderr.clone(),
            Self::Toolchain { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
