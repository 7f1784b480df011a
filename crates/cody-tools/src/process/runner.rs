use super::{CommandRunner, ProcessCommand, ProcessOutput};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::io::ErrorKind;
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Default per-command timeout (firmware builds are slow)
const DEFAULT_TIMEOUT_SECS: u64 = 600;

/// [`CommandRunner`] backed by real OS processes
#[derive(Debug, Clone)]
pub struct SystemRunner {
    timeout: Duration,
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemRunner {
    /// Create a runner with the default timeout
    #[must_use]
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    /// Set the per-command timeout
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CommandRunner for SystemRunner {
    async fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput> {
        let mut cmd = Command::new(&command.program);
        cmd.args(&command.args);
        if let Some(dir) = &command.cwd {
            cmd.current_dir(dir);
        }
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());
        cmd.kill_on_drop(true);

        debug!(command = %command, cwd = ?command.cwd, "Executing process");

        let child = cmd.spawn().map_err(|e| match e.kind() {
            ErrorKind::NotFound => Error::NotFound(command.program.clone()),
            _ => Error::Io(e),
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| Error::Timeout(self.timeout.as_millis() as u64))??;

        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
        };

        debug!(command = %command, exit_code = result.exit_code, "Process finished");
        Ok(result)
    }
}
