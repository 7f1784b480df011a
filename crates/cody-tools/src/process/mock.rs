//! Scripted runner for tests and dry runs

use super::{CommandRunner, ProcessCommand, ProcessOutput};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// A runner that replays queued results and records every command it saw.
///
/// When the queue is empty, commands succeed with empty output.
#[derive(Clone, Default)]
pub struct ScriptedRunner {
    responses: Arc<Mutex<VecDeque<Result<ProcessOutput>>>>,
    calls: Arc<Mutex<Vec<ProcessCommand>>>,
}

impl ScriptedRunner {
    /// Create an empty scripted runner
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the result of the next command
    pub fn push(&self, response: Result<ProcessOutput>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// Commands executed so far
    #[must_use]
    pub fn calls(&self) -> Vec<ProcessCommand> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl CommandRunner for ScriptedRunner {
    async fn run(&self, command: &ProcessCommand) -> Result<ProcessOutput> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(command.clone());
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(ProcessOutput::default()))
    }
}
