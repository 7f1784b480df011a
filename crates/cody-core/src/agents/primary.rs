//! Primary backend agent
//!
//! The primary backend is an external assistant CLI. It receives the raw
//! query text and answers on stdout; `--version` doubles as the
//! availability probe.

use super::{Agent, PRIMARY_AGENT};
use crate::error::AgentError;
use crate::i18n::{fill, Texts};
use async_trait::async_trait;
use cody_tools::{CommandRunner, ProcessCommand};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, instrument};

/// How to launch the primary backend
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PrimaryBackendConfig {
    /// Executable
    pub program: String,
    /// Arguments placed before the query flags
    pub args: Vec<String>,
}

impl Default for PrimaryBackendConfig {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["cody".to_string()],
        }
    }
}

impl PrimaryBackendConfig {
    fn command(&self) -> ProcessCommand {
        ProcessCommand::new(self.program.as_str()).args(self.args.iter().map(String::as_str))
    }
}

/// Shells out to the primary backend CLI
pub struct PrimaryBackendAgent {
    config: PrimaryBackendConfig,
    runner: Arc<dyn CommandRunner>,
    texts: &'static Texts,
}

impl PrimaryBackendAgent {
    /// Create an agent
    pub fn new(
        config: PrimaryBackendConfig,
        runner: Arc<dyn CommandRunner>,
        texts: &'static Texts,
    ) -> Self {
        Self {
            config,
            runner,
            texts,
        }
    }
}

#[async_trait]
impl Agent for PrimaryBackendAgent {
    fn name(&self) -> &str {
        PRIMARY_AGENT
    }

    #[instrument(skip(self, tokens), fields(agent = PRIMARY_AGENT))]
    async fn handle(&mut self, tokens: &[String]) -> Result<String, AgentError> {
        let query = tokens.join(" ");
        let command = self.config.command().arg("--query").arg(query);
        self.runner
            .run_checked(&command)
            .await
            .map(|output| output.stdout)
            .map_err(|e| {
                AgentError::Backend(fill(
                    self.texts.command_failed,
                    &[("error", e.diagnostic().trim())],
                ))
            })
    }

    async fn is_available(&self) -> bool {
        let probe = self.config.command().arg("--version");
        let available = matches!(self.runner.run(&probe).await, Ok(output) if output.is_success());
        debug!(program = %self.config.program, available, "Probed primary backend");
        available
    }
}
