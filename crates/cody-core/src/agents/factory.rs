//! Agent construction

use super::{
    Agent, ChatAgent, PrimaryBackendAgent, PrimaryBackendConfig, ToolchainAgent, CHAT_AGENT,
    PRIMARY_AGENT, TOOLCHAIN_AGENT,
};
use crate::error::AgentError;
use crate::i18n::Texts;
use cody_llm::{DeepSeekClient, DeepSeekConfig};
use cody_tools::{CommandRunner, ZephyrToolchain};
use serde::Deserialize;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Builds agent instances by name
pub trait AgentFactory: Send + Sync {
    /// Create the agent registered under `name`
    fn create(&self, name: &str) -> Result<Box<dyn Agent>, AgentError>;
}

/// Chat backend overrides; the API key always comes from the environment
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ChatSettings {
    /// API base URL
    pub base_url: Option<String>,
    /// Model name
    pub model: Option<String>,
    /// Request timeout in seconds
    pub timeout_secs: Option<u64>,
}

/// Factory for the built-in agents
pub struct DefaultAgentFactory {
    runner: Arc<dyn CommandRunner>,
    project_path: PathBuf,
    primary: PrimaryBackendConfig,
    chat: ChatSettings,
    texts: &'static Texts,
}

impl DefaultAgentFactory {
    /// Create a factory
    pub fn new(
        runner: Arc<dyn CommandRunner>,
        project_path: impl Into<PathBuf>,
        texts: &'static Texts,
    ) -> Self {
        Self {
            runner,
            project_path: project_path.into(),
            primary: PrimaryBackendConfig::default(),
            chat: ChatSettings::default(),
            texts,
        }
    }

    /// Override the primary backend command
    pub fn with_primary(mut self, primary: PrimaryBackendConfig) -> Self {
        self.primary = primary;
        self
    }

    /// Override chat settings
    pub fn with_chat(mut self, chat: ChatSettings) -> Self {
        self.chat = chat;
        self
    }

    fn chat_client(&self) -> Result<DeepSeekClient, AgentError> {
        let mut config = DeepSeekConfig::from_env()
            .map_err(|_| AgentError::Configuration(self.texts.missing_api_key.to_string()))?;
        if let Some(base_url) = &self.chat.base_url {
            config = config.with_base_url(base_url.as_str());
        }
        if let Some(model) = &self.chat.model {
            config = config.with_model(model.as_str());
        }
        if let Some(secs) = self.chat.timeout_secs {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        DeepSeekClient::new(config).map_err(|e| AgentError::Configuration(e.to_string()))
    }
}

impl AgentFactory for DefaultAgentFactory {
    fn create(&self, name: &str) -> Result<Box<dyn Agent>, AgentError> {
        match name {
            PRIMARY_AGENT => Ok(Box::new(PrimaryBackendAgent::new(
                self.primary.clone(),
                Arc::clone(&self.runner),
                self.texts,
            ))),
            TOOLCHAIN_AGENT => Ok(Box::new(ToolchainAgent::new(
                ZephyrToolchain::new(&self.project_path, Arc::clone(&self.runner)),
                self.texts,
            ))),
            CHAT_AGENT => Ok(Box::new(ChatAgent::new(self.chat_client()?, self.texts))),
            other => Err(AgentError::UnknownAgent(other.to_string())),
        }
    }
}
