//! Process execution
//!
//! Every external collaborator the router shells out to (git, west, pip,
//! the primary assistant CLI) goes through a [`CommandRunner`]. The runner
//! captures stdout, stderr and the exit code; [`CommandRunner::run_checked`]
//! additionally turns a non-zero exit into [`Error::Failed`] carrying stderr.

mod mock;
mod runner;


use crate::error::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};

pub use mock::ScriptedRunner;
pub use runner::SystemRunner;

/// An external command: program, arguments and optional working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessCommand {
    /// Program to execute (resolved through PATH)
    pub program: String,
    /// Arguments
    pub args: Vec<String>,
    /// Working directory
    pub cwd: Option<PathBuf>,
}

impl ProcessCommand {
    /// Create a command with no arguments
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
        }
    }

    /// Append one argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Run inside the given directory
    #[must_use]
    pub fn current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }
}

impl fmt::Display for ProcessCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    /// Standard output (lossy UTF-8)
    pub stdout: String,
    /// Standard error (lossy UTF-8)
    pub stderr: String,
    /// Exit code, -1 when killed by a signal
    pub exit_code: i32,
}

impl ProcessOutput {
    /// Successful output with the given stdout
    pub fn success(stdout: impl Into<String>) -> Self {
        Self {
            stdout: stdout.into(),
            stderr: String::new(),
            exit_code: 0,
        }
    }

    /// Failed output with the given exit code and stderr
    pub fn failure(exit_code: i32, stderr: impl Into<String>) -> Self {
        Self {
            stdout: String::new(),
            stderr: stderr.into(),
            exit_code,
        }
    }

    /// Whether the process exited with status 0
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Runs external commands
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run the command to completion and capture its output.
    ///
    /// A non-zero exit is *not* an error here; spawn failures are
    /// ([`Error::NotFound`] when the executable is missing).
    async fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput>;

    /// Run the command and treat a non-zero exit as [`Error::Failed`]
    async fn run_checked(&self, command: &ProcessCommand) -> Result<ProcessOutput> {
        let output = self.run(command).await?;
        if output.is_success() {
            Ok(output)
        } else {
            Err(Error::Failed {
                command: command.to_string(),
                code: output.exit_code,
                stderr: output.stderr,
            })
        }
    }
}
