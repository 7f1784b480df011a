//! Query session
//!
//! Owns the router for the lifetime of the process and turns dispatch
//! outcomes into terminal lines.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use cody_core::{
    default_registry, get_texts, AgentFactory, DefaultAgentFactory, Dispatch, FailoverPolicy,
    IntentClassifier, Router, RouterError, Texts, TOOLCHAIN_AGENT,
};
use cody_tools::SystemRunner;
use std::sync::Arc;

/// What the interactive loop should do with one input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// Leave the loop
    Exit,
    /// Blank line, prompt again
    Empty,
    /// Print this line
    Output(String),
    /// Print this diagnostic; stop the session when fatal
    Error {
        /// Localized one-line diagnostic
        message: String,
        /// Configuration failure that ends the session
        fatal: bool,
    },
}

impl Reply {
    /// Whether a one-shot command with this reply exits non-zero
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Error { .. })
    }
}

/// Render a successful dispatch as `[AGENT] response`
pub fn format_dispatch(dispatch: &Dispatch) -> String {
    format!("[{}] {}", dispatch.agent.to_uppercase(), dispatch.response)
}

/// A router plus the text table used for its messages
pub struct Session<F: AgentFactory = DefaultAgentFactory> {
    router: Router<F>,
    texts: &'static Texts,
}

impl<F: AgentFactory> Session<F> {
    /// Wrap a router; `texts` localizes every diagnostic
    pub fn new(router: Router<F>, texts: &'static Texts) -> Self {
        Self { router, texts }
    }

    /// Text table for prompts and diagnostics
    pub fn texts(&self) -> &'static Texts {
        self.texts
    }

    /// Classify and dispatch one query, returning the bare response
    pub async fn query(&mut self, query: &str) -> Result<String, RouterError> {
        self.router
            .process_query(query.trim())
            .await
            .map(|dispatch| dispatch.response)
    }

    /// Run toolchain tokens directly, skipping classification
    pub async fn toolchain(&mut self, tokens: &[String]) -> Result<String, RouterError> {
        self.router
            .dispatch_tokens(TOOLCHAIN_AGENT, tokens)
            .await
            .map(|dispatch| dispatch.response)
    }

    /// Turn a one-shot outcome into the reply to print
    pub fn conclude(&self, outcome: Result<String, RouterError>) -> Reply {
        match outcome {
            Ok(response) => Reply::Output(response),
            Err(e) => Reply::Error {
                message: e.user_message(self.texts),
                fatal: e.is_fatal(),
            },
        }
    }

    /// Handle one interactive line
    pub async fn interact(&mut self, line: &str) -> Reply {
        let query = line.trim();
        if query.is_empty() {
            return Reply::Empty;
        }
        if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
            return Reply::Exit;
        }

        match self.router.process_query(query).await {
            Ok(dispatch) => Reply::Output(format_dispatch(&dispatch)),
            Err(e) => Reply::Error {
                message: e.user_message(self.texts),
                fatal: e.is_fatal(),
            },
        }
    }
}

/// Build the production session from configuration
pub fn build_session(config: &AppConfig) -> Result<Session> {
    let texts = get_texts(config.language());
    let registry = default_registry().context("Failed to load pattern registry")?;
    let classifier = IntentClassifier::new(registry, config.classifier_config());

    let runner = Arc::new(SystemRunner::new().with_timeout(config.toolchain.command_timeout()));
    let factory = DefaultAgentFactory::new(runner, &config.toolchain.project_path, texts)
        .with_primary(config.primary.clone())
        .with_chat(config.chat.clone());

    Ok(Session::new(
        Router::new(classifier, factory, FailoverPolicy::default()),
        texts,
    ))
}
