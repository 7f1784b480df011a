//! Cody Core - Natural-language command routing
//!
//! This crate turns free text into structured command invocations and
//! dispatches them:
//! - Registry: ordered agent specs (pattern rules + parameter extractors)
//! - Classifier: query text → [`Intent`] (agent name + command tokens)
//! - Agents: toolchain, chat and primary-backend adapters behind one trait
//! - Router: lazy agent instances, availability probe and one-level failover
//! - Cache: Redis-backed JSON store used by the standalone cache entry point
//! - I18n: explicit localization tables for user-facing text

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod agents;
pub mod cache;
pub mod classifier;
pub mod error;
pub mod i18n;
pub mod registry;
pub mod router;

pub use agents::{
    Agent, AgentFactory, ChatAgent, ChatSettings, DefaultAgentFactory, PrimaryBackendAgent,
    PrimaryBackendConfig, ToolchainAgent, ToolchainCommand, CHAT_AGENT, PRIMARY_AGENT,
    TOOLCHAIN_AGENT,
};
pub use cache::{process_request, CacheAgent, CacheConfig, ProcessedRequest, RedisCache, CACHE_AGENT};
pub use classifier::{ClassifierConfig, Intent, IntentClassifier};
pub use error::{AgentError, CacheError, ClassifyError, Error, RegistryError, Result};
pub use i18n::{detect_language, get_texts, Language, Texts};
pub use registry::{default_registry, AgentSpec, CommandType, MissingField, PatternRegistry, PatternRule};
pub use router::{Dispatch, FailoverPolicy, Router, RouterError};
