//! Zephyr firmware toolchain wrapper
//!
//! Thin wrapper over `git`, `west` and `pip`. Every operation runs through a
//! [`CommandRunner`] and classifies its own failures with the
//! [`ToolchainDoctor`], so callers receive an [`Error::Toolchain`] with a
//! [`FailureCategory`] instead of raw stderr.

mod security;

#[cfg(test)]
mod tests;

use crate::doctor::{FailureCategory, Operation, ToolchainDoctor};
use crate::error::{Error, Result};
use crate::process::{CommandRunner, ProcessCommand};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{info, instrument, warn};

pub use security::{is_valid_board_name, is_valid_clone_url};

/// Board used when none is given
pub const DEFAULT_BOARD: &str = "native_posix";

/// Executables that must answer `--version`
const REQUIRED_TOOLS: &[&str] = &["cmake", "ninja", "dtc", "west", "gcc"];

/// Python packages that must be installed
const REQUIRED_PYTHON_PACKAGES: &[&str] = &["pytest"];

/// Outcome of an environment check
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvironmentReport {
    /// Tools and packages that were not found
    pub missing: Vec<String>,
    /// Whether dependencies were installed as part of this run
    pub installed: bool,
}

impl EnvironmentReport {
    /// No missing tools
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Zephyr project toolchain bound to one project directory
pub struct ZephyrToolchain {
    project_path: PathBuf,
    runner: Arc<dyn CommandRunner>,
    doctor: ToolchainDoctor,
}

impl ZephyrToolchain {
    /// Create a toolchain rooted at `project_path`
    pub fn new(project_path: impl AsRef<Path>, runner: Arc<dyn CommandRunner>) -> Self {
        Self {
            project_path: absolutize(project_path.as_ref()),
            runner,
            doctor: ToolchainDoctor::new(),
        }
    }

    /// Current project directory
    #[must_use]
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }

    /// Re-root the toolchain at another directory
    pub fn set_project_path(&mut self, project_path: impl AsRef<Path>) {
        self.project_path = absolutize(project_path.as_ref());
    }

    /// Probe required tools and python packages
    #[instrument(skip(self))]
    pub async fn check_environment(&self) -> EnvironmentReport {
        let mut missing = Vec::new();

        for tool in REQUIRED_TOOLS {
            if !self.probe(ProcessCommand::new(*tool).arg("--version")).await {
                missing.push((*tool).to_string());
            }
        }

        for package in REQUIRED_PYTHON_PACKAGES {
            let cmd = ProcessCommand::new("python3").args(["-m", "pip", "show", *package]);
            if !self.probe(cmd).await {
                missing.push((*package).to_string());
            }
        }

        if !missing.is_empty() {
            warn!(missing = ?missing, "Toolchain prerequisites missing");
        }

        EnvironmentReport {
            missing,
            installed: false,
        }
    }

    /// Check the environment and install west if anything is missing
    #[instrument(skip(self))]
    pub async fn setup_environment(&self) -> Result<EnvironmentReport> {
        let mut report = self.check_environment().await;
        if report.is_ready() {
            return Ok(report);
        }

        info!("Installing toolchain dependencies");
        self.run(
            Operation::Setup,
            ProcessCommand::new("pip").args(["install", "west"]),
        )
        .await?;
        self.run(
            Operation::Setup,
            ProcessCommand::new("west")
                .arg("update")
                .current_dir(&self.project_path),
        )
        .await?;

        report.installed = true;
        Ok(report)
    }

    /// `git clone --recursive <url> <project_path>`
    #[instrument(skip(self))]
    pub async fn clone_repo(&self, repo_url: &str) -> Result<()> {
        if !is_valid_clone_url(repo_url) {
            return Err(Error::InvalidInput(format!(
                "unsupported repository URL: {repo_url}"
            )));
        }

        let target = self.project_path.to_string_lossy().to_string();
        self.run(
            Operation::Clone,
            ProcessCommand::new("git").args(["clone", "--recursive", repo_url, target.as_str()]),
        )
        .await?;

        info!(url = %repo_url, path = %target, "Repository cloned");
        Ok(())
    }

    /// Fetch `pull/<n>/head` into `pr-<n>`, check it out and refresh modules
    #[instrument(skip(self))]
    pub async fn switch_pr(&self, pr_number: u32) -> Result<()> {
        let branch = format!("pr-{pr_number}");
        let refspec = format!("pull/{pr_number}/head:{branch}");

        self.run(
            Operation::SwitchPr,
            ProcessCommand::new("git")
                .args(["fetch", "origin", refspec.as_str()])
                .current_dir(&self.project_path),
        )
        .await?;
        self.run(
            Operation::SwitchPr,
            ProcessCommand::new("git")
                .args(["checkout", branch.as_str()])
                .current_dir(&self.project_path),
        )
        .await?;
        self.run(
            Operation::SwitchPr,
            ProcessCommand::new("west")
                .arg("update")
                .current_dir(&self.project_path),
        )
        .await?;

        info!(pr = pr_number, "Switched to pull request");
        Ok(())
    }

    /// `west build -b <board> .`
    #[instrument(skip(self))]
    pub async fn compile(&self, board: &str) -> Result<()> {
        if !is_valid_board_name(board) {
            return Err(Error::InvalidInput(format!("invalid board name: {board}")));
        }

        self.run(
            Operation::Compile,
            ProcessCommand::new("west")
                .args(["build", "-b", board, "."])
                .current_dir(&self.project_path),
        )
        .await?;
        Ok(())
    }

    /// `west twister [args...]`, returning the runner's stdout
    #[instrument(skip(self))]
    pub async fn run_tests(&self, args: Option<&str>) -> Result<String> {
        let extra: Vec<&str> = args.map(|a| a.split_whitespace().collect()).unwrap_or_default();
        let output = self
            .run(
                Operation::Test,
                ProcessCommand::new("west")
                    .arg("twister")
                    .args(extra)
                    .current_dir(&self.project_path),
            )
            .await?;
        Ok(output)
    }

    async fn run(&self, operation: Operation, command: ProcessCommand) -> Result<String> {
        self.runner
            .run_checked(&command)
            .await
            .map(|output| output.stdout)
            .map_err(|e| {
                let classified = self.doctor.classify_error(operation, e);
                if let Error::Toolchain { category, .. } = &classified {
                    warn!(operation = %operation, category = ?category, command = %command, "Toolchain command failed");
                }
                classified
            })
    }

    async fn probe(&self, command: ProcessCommand) -> bool {
        matches!(self.runner.run(&command).await, Ok(output) if output.is_success())
    }
}

impl std::fmt::Debug for ZephyrToolchain {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ZephyrToolchain")
            .field("project_path", &self.project_path)
            .finish_non_exhaustive()
    }
}

/// Category of a toolchain error, if it carries one
#[must_use]
pub fn failure_category(error: &Error) -> Option<FailureCategory> {
    match error {
        Error::Toolchain { category, .. } => Some(*category),
        _ => None,
    }
}

fn absolutize(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}
