//! Intent classifier
//!
//! Walks the registry in order and stops at the first agent whose rules
//! match. The matched command-type's extractor turns the query into
//! tokens. Queries no rule recognizes go to the primary agent with an
//! empty token list, unless strict mode is on.


use crate::agents::PRIMARY_AGENT;
use crate::error::ClassifyError;
use crate::registry::{AgentSpec, CommandType, MissingField, PatternRegistry};
use serde::Deserialize;
use std::collections::HashSet;
use tracing::debug;

/// Classification result: which agent, with which command tokens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Intent {
    /// Agent name
    pub agent: String,
    /// Command name followed by its arguments (may be empty)
    pub tokens: Vec<String>,
}

impl Intent {
    /// Create an intent
    pub fn new(agent: impl Into<String>, tokens: Vec<String>) -> Self {
        Self {
            agent: agent.into(),
            tokens,
        }
    }
}

/// Classifier behavior switches
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    /// Agent that receives unrecognized queries
    pub primary_agent: String,
    /// Reject unrecognized queries instead of routing them to the primary agent
    pub strict_unrecognized: bool,
    /// Command-types that dispatch with empty tokens instead of failing on a missing parameter
    pub lenient_commands: HashSet<CommandType>,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            primary_agent: PRIMARY_AGENT.to_string(),
            strict_unrecognized: false,
            lenient_commands: HashSet::new(),
        }
    }
}

/// Maps query text to an [`Intent`]
#[derive(Debug, Clone)]
pub struct IntentClassifier {
    registry: PatternRegistry,
    config: ClassifierConfig,
}

impl IntentClassifier {
    /// Create a classifier over a loaded registry
    pub fn new(registry: PatternRegistry, config: ClassifierConfig) -> Self {
        Self { registry, config }
    }

    /// The registry in use
    pub fn registry(&self) -> &PatternRegistry {
        &self.registry
    }

    /// Name of the agent unrecognized queries go to
    pub fn primary_agent(&self) -> &str {
        &self.config.primary_agent
    }

    /// Classify a query
    pub fn classify(&self, query: &str) -> Result<Intent, ClassifyError> {
        for spec in self.registry.specs() {
            if let Some(command) = spec.match_query(query) {
                debug!(agent = %spec.name(), command = %command, "Query matched rule");
                return self.extract(spec, command, query);
            }
        }

        if self.config.strict_unrecognized {
            return Err(ClassifyError::Unrecognized);
        }

        debug!(agent = %self.config.primary_agent, "No rule matched, using primary agent");
        Ok(Intent::new(self.config.primary_agent.clone(), Vec::new()))
    }

    /// Re-extract a query for a specific agent using its fallback command
    pub fn extract_for(&self, agent: &str, query: &str) -> Result<Intent, ClassifyError> {
        let spec = self
            .registry
            .get(agent)
            .ok_or_else(|| ClassifyError::UnknownAgent(agent.to_string()))?;
        let command = spec
            .fallback_command()
            .ok_or_else(|| ClassifyError::NoFallbackCommand(agent.to_string()))?;
        self.extract(spec, command, query)
    }

    fn extract(
        &self,
        spec: &AgentSpec,
        command: CommandType,
        query: &str,
    ) -> Result<Intent, ClassifyError> {
        // build() guarantees an extractor for every rule and the fallback
        let Some(extractor) = spec.extractor(command) else {
            return Err(ClassifyError::NoFallbackCommand(spec.name().to_string()));
        };

        match extractor(query) {
            Ok(tokens) => Ok(Intent::new(spec.name(), tokens)),
            Err(MissingField(field)) if self.config.lenient_commands.contains(&command) => {
                debug!(agent = %spec.name(), command = %command, field, "Missing parameter, dispatching empty tokens");
                Ok(Intent::new(spec.name(), Vec::new()))
            }
            Err(MissingField(field)) => Err(ClassifyError::MissingParameter {
                agent: spec.name().to_string(),
                command,
                field,
            }),
        }
    }
}
