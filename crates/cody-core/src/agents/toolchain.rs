//! Firmware toolchain agent

use super::{Agent, TOOLCHAIN_AGENT};
use crate::error::AgentError;
use crate::i18n::{fill, Texts};
use async_trait::async_trait;
use cody_tools::{failure_category, FailureCategory, ZephyrToolchain, DEFAULT_BOARD};
use tracing::{debug, instrument};

/// Parsed toolchain command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolchainCommand {
    /// `init [--path P]`
    Init {
        /// New project root
        path: Option<String>,
    },
    /// `clone URL`
    Clone {
        /// Repository URL
        url: Option<String>,
    },
    /// `pr N`
    Pr {
        /// PR number as given
        number: Option<String>,
    },
    /// `compile [-b BOARD]`
    Compile {
        /// Target board
        board: Option<String>,
    },
    /// `test [ARGS...]`
    Test {
        /// Extra test runner arguments
        args: Option<String>,
    },
    /// Empty token list or an unsupported command name
    Unknown(String),
}

impl ToolchainCommand {
    /// Parse a token list
    pub fn parse(tokens: &[String]) -> Self {
        let Some((name, rest)) = tokens.split_first() else {
            return Self::Unknown(String::new());
        };

        match name.as_str() {
            "init" => Self::Init {
                path: flag_value(rest, &["--path", "-p"]),
            },
            "clone" => Self::Clone {
                url: rest.first().cloned(),
            },
            "pr" => Self::Pr {
                number: rest.first().cloned(),
            },
            "compile" => Self::Compile {
                board: flag_value(rest, &["-b", "--board"]).or_else(|| {
                    rest.first().filter(|t| !t.starts_with('-')).cloned()
                }),
            },
            "test" => Self::Test {
                args: (!rest.is_empty()).then(|| rest.join(" ")),
            },
            other => Self::Unknown(other.to_string()),
        }
    }
}

/// Value following `--flag` / `-f`, or attached as `--flag=value`
fn flag_value(tokens: &[String], flags: &[&str]) -> Option<String> {
    let mut iter = tokens.iter();
    while let Some(token) = iter.next() {
        if flags.contains(&token.as_str()) {
            return iter.next().cloned();
        }
        for flag in flags {
            if let Some(value) = token.strip_prefix(&format!("{flag}=")) {
                return Some(value.to_string());
            }
        }
    }
    None
}

/// Adapter over [`ZephyrToolchain`]
#[derive(Debug)]
pub struct ToolchainAgent {
    toolchain: ZephyrToolchain,
    texts: &'static Texts,
}

impl ToolchainAgent {
    /// Wrap a toolchain
    pub fn new(toolchain: ZephyrToolchain, texts: &'static Texts) -> Self {
        Self { toolchain, texts }
    }

    /// The wrapped toolchain
    pub fn toolchain(&self) -> &ZephyrToolchain {
        &self.toolchain
    }

    fn toolchain_error(&self, error: cody_tools::Error) -> AgentError {
        match error {
            cody_tools::Error::InvalidInput(message) => AgentError::InvalidCommand(message),
            other => {
                let category = failure_category(&other).unwrap_or(FailureCategory::Generic);
                AgentError::Toolchain {
                    category,
                    message: self.texts.failure_message(category, &other.diagnostic()),
                }
            }
        }
    }
}

#[async_trait]
impl Agent for ToolchainAgent {
    fn name(&self) -> &str {
        TOOLCHAIN_AGENT
    }

    #[instrument(skip(self), fields(agent = TOOLCHAIN_AGENT))]
    async fn handle(&mut self, tokens: &[String]) -> Result<String, AgentError> {
        let command = ToolchainCommand::parse(tokens);
        debug!(command = ?command, "Parsed toolchain command");

        match command {
            ToolchainCommand::Init { path } => {
                if let Some(path) = path {
                    self.toolchain.set_project_path(path);
                }
                let report = self
                    .toolchain
                    .setup_environment()
                    .await
                    .map_err(|e| self.toolchain_error(e))?;
                if report.installed {
                    Ok(fill(
                        self.texts.dependencies_installed,
                        &[("missing", report.missing.join(", ").as_str())],
                    ))
                } else {
                    Ok(self.texts.env_ready.to_string())
                }
            }
            ToolchainCommand::Clone { url: None } => {
                Err(AgentError::InvalidCommand(self.texts.missing_url.to_string()))
            }
            ToolchainCommand::Clone { url: Some(url) } => {
                self.toolchain
                    .clone_repo(&url)
                    .await
                    .map_err(|e| self.toolchain_error(e))?;
                let path = self.toolchain.project_path().display().to_string();
                Ok(fill(self.texts.repo_cloned, &[("path", path.as_str())]))
            }
            ToolchainCommand::Pr { number } => {
                let raw = number.unwrap_or_default();
                let parsed = raw.trim_start_matches('#').parse::<u32>().map_err(|_| {
                    AgentError::InvalidCommand(fill(self.texts.invalid_pr, &[("number", raw.as_str())]))
                })?;
                self.toolchain
                    .switch_pr(parsed)
                    .await
                    .map_err(|e| self.toolchain_error(e))?;
                Ok(fill(self.texts.pr_switched, &[("number", parsed.to_string().as_str())]))
            }
            ToolchainCommand::Compile { board } => {
                let board = board.unwrap_or_else(|| DEFAULT_BOARD.to_string());
                self.toolchain
                    .compile(&board)
                    .await
                    .map_err(|e| self.toolchain_error(e))?;
                Ok(fill(self.texts.build_complete, &[("board", board.as_str())]))
            }
            ToolchainCommand::Test { args } => {
                let output = self
                    .toolchain
                    .run_tests(args.as_deref())
                    .await
                    .map_err(|e| self.toolchain_error(e))?;
                if output.trim().is_empty() {
                    Ok(self.texts.tests_complete.to_string())
                } else {
                    Ok(output)
                }
            }
            ToolchainCommand::Unknown(_) => Err(AgentError::UnknownCommand(
                self.texts.toolchain_unknown_command.to_string(),
            )),
        }
    }

    async fn is_available(&self) -> bool {
        true
    }
}
