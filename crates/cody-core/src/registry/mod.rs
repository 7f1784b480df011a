//! Pattern registry
//!
//! An ordered list of [`AgentSpec`]s. Each spec owns its pattern rules (one
//! per command-type, each a list of case-insensitive regex alternatives) and
//! the parameter extractor for every command-type it can produce. Patterns
//! are compiled when a spec is built, so a bad pattern fails at load time
//! instead of on the first query that reaches it.

mod defaults;
mod extractors;

#[cfg(test)]
mod tests;

pub use defaults::default_registry;
pub use extractors::{
    extract_chat, extract_clone, extract_compile, extract_init, extract_pr, extract_test,
};

use crate::error::RegistryError;
use regex::{Regex, RegexBuilder};
use serde::Deserialize;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Command-type produced by a matched rule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    /// Set up the toolchain environment
    Init,
    /// Clone a repository
    Clone,
    /// Switch to a pull request
    Pr,
    /// Build firmware
    Compile,
    /// Run the test runner
    Test,
    /// Free-form question for the chat backend
    Chat,
}

impl CommandType {
    /// All command-types, in declaration order
    pub const ALL: [CommandType; 6] = [
        Self::Init,
        Self::Clone,
        Self::Pr,
        Self::Compile,
        Self::Test,
        Self::Chat,
    ];

    /// The first token emitted for this command-type
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Clone => "clone",
            Self::Pr => "pr",
            Self::Compile => "compile",
            Self::Test => "test",
            Self::Chat => "chat",
        }
    }
}

impl fmt::Display for CommandType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown command type: {s}"))
    }
}

/// A required parameter the extractor could not find
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MissingField(pub &'static str);

/// Parameter extractor: query text → command tokens (first token is the command name)
pub type ExtractorFn = fn(&str) -> Result<Vec<String>, MissingField>;

/// One command-type and its compiled alternatives
#[derive(Debug, Clone)]
pub struct PatternRule {
    command: CommandType,
    alternatives: Vec<Regex>,
}

impl PatternRule {
    /// Command-type this rule produces
    pub fn command(&self) -> CommandType {
        self.command
    }

    /// Whether any alternative matches anywhere in the text
    pub fn is_match(&self, text: &str) -> bool {
        self.alternatives.iter().any(|re| re.is_match(text))
    }
}

/// An agent's rules, extractors and optional fallback command
#[derive(Debug, Clone)]
pub struct AgentSpec {
    name: String,
    rules: Vec<PatternRule>,
    extractors: HashMap<CommandType, ExtractorFn>,
    fallback: Option<CommandType>,
}

impl AgentSpec {
    /// Start building a spec
    pub fn builder(name: impl Into<String>) -> AgentSpecBuilder {
        AgentSpecBuilder {
            name: name.into(),
            rules: Vec::new(),
            extractors: Vec::new(),
            fallback: None,
        }
    }

    /// Agent name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rules in match order
    pub fn rules(&self) -> &[PatternRule] {
        &self.rules
    }

    /// Command used when this agent takes over an unclassified query
    pub fn fallback_command(&self) -> Option<CommandType> {
        self.fallback
    }

    /// Extractor for a command-type
    pub fn extractor(&self, command: CommandType) -> Option<ExtractorFn> {
        self.extractors.get(&command).copied()
    }

    /// First rule (in order) with a matching alternative
    pub fn match_query(&self, text: &str) -> Option<CommandType> {
        self.rules
            .iter()
            .find(|rule| rule.is_match(text))
            .map(PatternRule::command)
    }
}

/// Builder for [`AgentSpec`]; validation happens in [`AgentSpecBuilder::build`]
#[derive(Debug)]
pub struct AgentSpecBuilder {
    name: String,
    rules: Vec<(CommandType, Vec<String>)>,
    extractors: Vec<(CommandType, ExtractorFn)>,
    fallback: Option<CommandType>,
}

impl AgentSpecBuilder {
    /// Add a rule; alternatives are tried in the given order
    pub fn rule(mut self, command: CommandType, alternatives: &[&str]) -> Self {
        self.rules
            .push((command, alternatives.iter().map(|s| s.to_string()).collect()));
        self
    }

    /// Register the extractor for a command-type
    pub fn extractor(mut self, command: CommandType, extractor: ExtractorFn) -> Self {
        self.extractors.push((command, extractor));
        self
    }

    /// Command used on failover
    pub fn fallback(mut self, command: CommandType) -> Self {
        self.fallback = Some(command);
        self
    }

    /// Compile every pattern and check extractor coverage
    pub fn build(self) -> Result<AgentSpec, RegistryError> {
        let extractors: HashMap<CommandType, ExtractorFn> = self.extractors.into_iter().collect();

        let mut rules = Vec::with_capacity(self.rules.len());
        for (command, patterns) in self.rules {
            if patterns.is_empty() {
                return Err(RegistryError::EmptyRule {
                    agent: self.name,
                    command,
                });
            }
            if !extractors.contains_key(&command) {
                return Err(RegistryError::MissingExtractor {
                    agent: self.name,
                    command,
                });
            }

            let mut alternatives = Vec::with_capacity(patterns.len());
            for pattern in &patterns {
                match RegexBuilder::new(pattern).case_insensitive(true).build() {
                    Ok(re) => alternatives.push(re),
                    Err(source) => {
                        return Err(RegistryError::InvalidPattern {
                            agent: self.name,
                            command,
                            source,
                        })
                    }
                }
            }
            rules.push(PatternRule {
                command,
                alternatives,
            });
        }

        if let Some(command) = self.fallback {
            if !extractors.contains_key(&command) {
                return Err(RegistryError::MissingExtractor {
                    agent: self.name,
                    command,
                });
            }
        }

        Ok(AgentSpec {
            name: self.name,
            rules,
            extractors,
            fallback: self.fallback,
        })
    }
}

/// Ordered, immutable-after-load collection of agent specs
#[derive(Debug, Clone, Default)]
pub struct PatternRegistry {
    specs: Vec<AgentSpec>,
}

impl PatternRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spec; agent names must be unique
    pub fn register(&mut self, spec: AgentSpec) -> Result<(), RegistryError> {
        if self.get(spec.name()).is_some() {
            return Err(RegistryError::DuplicateAgent(spec.name));
        }
        self.specs.push(spec);
        Ok(())
    }

    /// Specs in registration order
    pub fn specs(&self) -> &[AgentSpec] {
        &self.specs
    }

    /// Look up a spec by agent name
    pub fn get(&self, name: &str) -> Option<&AgentSpec> {
        self.specs.iter().find(|s| s.name == name)
    }

    /// Number of registered agents
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    /// Whether the registry is empty
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}
