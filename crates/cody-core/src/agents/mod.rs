//! Agent adapters
//!
//! Every backend the router can dispatch to implements [`Agent`]: take a
//! token list (command name first), return a response string or an
//! [`AgentError`]. Instances are built by an [`AgentFactory`] so the router
//! never names concrete adapter types.

mod chat;
mod factory;
mod primary;
mod toolchain;


pub use chat::ChatAgent;
pub use factory::{AgentFactory, ChatSettings, DefaultAgentFactory};
pub use primary::{PrimaryBackendAgent, PrimaryBackendConfig};
pub use toolchain::{ToolchainAgent, ToolchainCommand};

use crate::error::AgentError;
use async_trait::async_trait;

/// Name of the primary backend agent
pub const PRIMARY_AGENT: &str = "cody";

/// Name of the firmware toolchain agent
pub const TOOLCHAIN_AGENT: &str = "zephyr";

/// Name of the chat agent
pub const CHAT_AGENT: &str = "deepseek";

/// A dispatch target
#[async_trait]
pub trait Agent: Send + Sync {
    /// Agent name
    fn name(&self) -> &str;

    /// Execute a command; `tokens[0]` is the command name
    async fn handle(&mut self, tokens: &[String]) -> Result<String, AgentError>;

    /// Whether the backend is reachable right now
    async fn is_available(&self) -> bool {
        true
    }
}
