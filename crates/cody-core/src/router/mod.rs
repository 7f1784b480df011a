//! Query router
//!
//! Classifies a query, builds the target agent on first use and dispatches
//! the tokens. When the classifier picks the primary agent and the primary
//! backend does not answer its probe, the query is re-extracted for the
//! secondary agent and dispatched there instead. Failover is one level deep.

#[cfg(test)]
mod tests;

use crate::agents::{Agent, AgentFactory, DefaultAgentFactory, CHAT_AGENT};
use crate::classifier::IntentClassifier;
use crate::error::{AgentError, ClassifyError};
use crate::i18n::{fill, Texts};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Router errors
#[derive(Debug, Error)]
pub enum RouterError {
    /// Classification failed
    #[error(transparent)]
    Classification(#[from] ClassifyError),

    /// The chosen agent failed
    #[error("{source}")]
    Agent {
        /// Agent name
        agent: String,
        /// Underlying error
        #[source]
        source: AgentError,
    },
}

impl RouterError {
    /// Name of the agent that failed, if an agent was reached
    pub fn agent(&self) -> Option<&str> {
        match self {
            Self::Agent { agent, .. } => Some(agent),
            Self::Classification(_) => None,
        }
    }

    /// Whether the session should stop rather than continue
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Agent { source, .. } if source.is_fatal())
    }

    /// One-line diagnostic for the terminal
    pub fn user_message(&self, texts: &Texts) -> String {
        let error = self.to_string();
        match self {
            Self::Agent { agent, .. } => fill(
                texts.agent_error,
                &[("agent", agent.as_str()), ("error", error.as_str())],
            ),
            Self::Classification(_) => fill(texts.query_error, &[("error", error.as_str())]),
        }
    }
}

/// Where queries go when the classifier's primary agent fails its probe
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailoverPolicy {
    /// Agent that takes over when the probe fails
    pub secondary: String,
}

impl Default for FailoverPolicy {
    fn default() -> Self {
        Self {
            secondary: CHAT_AGENT.to_string(),
        }
    }
}

/// Outcome of a dispatched query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dispatch {
    /// Agent that produced the response
    pub agent: String,
    /// Response text
    pub response: String,
    /// Whether failover redirected the query
    pub failed_over: bool,
}

/// Routes queries to lazily created agents
pub struct Router<F: AgentFactory = DefaultAgentFactory> {
    classifier: IntentClassifier,
    factory: F,
    failover: FailoverPolicy,
    instances: HashMap<String, Box<dyn Agent>>,
}

impl<F: AgentFactory> Router<F> {
    /// Create a router
    pub fn new(classifier: IntentClassifier, factory: F, failover: FailoverPolicy) -> Self {
        Self {
            classifier,
            factory,
            failover,
            instances: HashMap::new(),
        }
    }

    /// The classifier in use
    pub fn classifier(&self) -> &IntentClassifier {
        &self.classifier
    }

    /// Names of agents instantiated so far
    pub fn active_agents(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.instances.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }

    /// Classify and dispatch a query
    #[instrument(skip(self))]
    pub async fn process_query(&mut self, query: &str) -> Result<Dispatch, RouterError> {
        let intent = self.classifier.classify(query)?;

        if intent.agent != self.classifier.primary_agent() {
            return self.dispatch(&intent.agent, &intent.tokens, false).await;
        }

        let primary = intent.agent;
        if self.probe(&primary).await {
            // the primary backend takes the raw query, not extracted tokens
            return self.dispatch(&primary, &[query.to_string()], false).await;
        }

        let secondary = self.failover.secondary.clone();
        info!(primary = %primary, secondary = %secondary, "Primary backend unavailable, failing over");
        let intent = self.classifier.extract_for(&secondary, query)?;
        self.dispatch(&intent.agent, &intent.tokens, true).await
    }

    /// Dispatch explicit tokens to a named agent, bypassing classification
    pub async fn dispatch_tokens(
        &mut self,
        agent: &str,
        tokens: &[String],
    ) -> Result<Dispatch, RouterError> {
        self.dispatch(agent, tokens, false).await
    }

    async fn dispatch(
        &mut self,
        name: &str,
        tokens: &[String],
        failed_over: bool,
    ) -> Result<Dispatch, RouterError> {
        debug!(agent = %name, tokens = ?tokens, "Dispatching");
        let agent = self.instance(name)?;
        match agent.handle(tokens).await {
            Ok(response) => Ok(Dispatch {
                agent: name.to_string(),
                response,
                failed_over,
            }),
            Err(source) => {
                warn!(agent = %name, error = %source, "Agent failed");
                Err(RouterError::Agent {
                    agent: name.to_string(),
                    source,
                })
            }
        }
    }

    async fn probe(&mut self, name: &str) -> bool {
        match self.instance(name) {
            Ok(agent) => agent.is_available().await,
            Err(e) => {
                warn!(agent = %name, error = %e, "Could not create agent for probe");
                false
            }
        }
    }

    fn instance(&mut self, name: &str) -> Result<&mut dyn Agent, RouterError> {
        let agent = match self.instances.entry(name.to_string()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                let created = self.factory.create(name).map_err(|source| RouterError::Agent {
                    agent: name.to_string(),
                    source,
                })?;
                debug!(agent = %name, "Agent instantiated");
                entry.insert(created)
            }
        };
        Ok(agent.as_mut())
    }
}
