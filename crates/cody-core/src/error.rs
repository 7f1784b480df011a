//! Error types for cody-core
//!
//! Each stage of the pipeline has its own error enum so callers can tell a
//! bad registry (fatal at load) from a query that named a command but left
//! out a parameter, from an adapter whose backend failed.

use crate::registry::CommandType;
use cody_tools::FailureCategory;
use thiserror::Error;

/// Pattern registry errors (fatal at load time)
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two specs share an agent name
    #[error("duplicate agent '{0}' in pattern registry")]
    DuplicateAgent(String),

    /// A pattern alternative failed to compile
    #[error("invalid pattern for agent '{agent}' ({command}): {source}")]
    InvalidPattern {
        /// Agent the rule belongs to
        agent: String,
        /// Command-type of the rule
        command: CommandType,
        /// Regex compile error
        #[source]
        source: regex::Error,
    },

    /// A rule or the fallback names a command-type with no extractor
    #[error("agent '{agent}' has no extractor for command '{command}'")]
    MissingExtractor {
        /// Agent name
        agent: String,
        /// Command-type without extractor
        command: CommandType,
    },

    /// A rule has no alternatives
    #[error("agent '{agent}' has an empty rule for command '{command}'")]
    EmptyRule {
        /// Agent name
        agent: String,
        /// Command-type of the empty rule
        command: CommandType,
    },
}

/// Classification errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClassifyError {
    /// Recognized command-type, but a required parameter is absent
    #[error("'{command}' command for agent '{agent}' is missing the {field}")]
    MissingParameter {
        /// Agent that matched
        agent: String,
        /// Command-type that matched
        command: CommandType,
        /// Name of the missing field
        field: &'static str,
    },

    /// No rule matched and strict mode is enabled
    #[error("no agent recognized the query")]
    Unrecognized,

    /// The named agent is not registered
    #[error("agent '{0}' is not registered")]
    UnknownAgent(String),

    /// The agent cannot take over unclassified queries
    #[error("agent '{0}' has no fallback command")]
    NoFallbackCommand(String),
}

/// Agent adapter errors
#[derive(Debug, Error)]
pub enum AgentError {
    /// Missing or invalid configuration; fatal for the session
    #[error("configuration error: {0}")]
    Configuration(String),

    /// No adapter exists for the name
    #[error("unknown agent: {0}")]
    UnknownAgent(String),

    /// Command name not supported by the adapter
    #[error("{0}")]
    UnknownCommand(String),

    /// Command recognized but its arguments are unusable
    #[error("{0}")]
    InvalidCommand(String),

    /// Toolchain failure with a classified cause
    #[error("{message}")]
    Toolchain {
        /// Classified cause
        category: FailureCategory,
        /// Localized user-facing message
        message: String,
    },

    /// Chat API transport/HTTP failure
    #[error("{0}")]
    Api(String),

    /// Primary backend process failure
    #[error("{0}")]
    Backend(String),
}

impl AgentError {
    /// Whether the session should stop rather than continue
    #[must_use]
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

/// Cache errors
#[derive(Debug, Error)]
pub enum CacheError {
    /// Could not connect or PING failed
    #[error("Redis connection failed: {0}")]
    Connection(String),

    /// A Redis command failed
    #[error("Redis command failed: {0}")]
    Command(String),

    /// JSON encoding or decoding failed
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Input record is missing a field
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Chat backend failed while processing a record
    #[error("llm error: {0}")]
    Llm(#[from] cody_llm::Error),
}

/// Core error type
#[derive(Debug, Error)]
pub enum Error {
    /// Registry error
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Classification error
    #[error(transparent)]
    Classify(#[from] ClassifyError),

    /// Agent error
    #[error(transparent)]
    Agent(#[from] AgentError),

    /// Cache error
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Router error
    #[error(transparent)]
    Router(#[from] crate::router::RouterError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
