use crate::error::{ReleaseError, Result};
use crate::exec::{CommandOutput, CommandRunner};
use std::collections::HashMap;
use std::sync::Mutex;

/// Mock runner for testing without spawning processes
///
/// Commands without a scripted response succeed with empty output. Every call
/// is recorded, in order.
pub struct MockRunner {
    responses: HashMap<String, std::result::Result<String, String>>,
    calls: Mutex<Vec<String>>,
}

impl MockRunner {
    /// Create a new mock runner with no scripted responses
    pub fn new() -> Self {
        MockRunner {
            responses: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script a successful command with the given stdout
    pub fn with_output(mut self, command: impl Into<String>, stdout: impl Into<String>) -> Self {
        self.responses.insert(command.into(), Ok(stdout.into()));
        self
    }

    /// Script a failing command with the given error message
    pub fn with_failure(mut self, command: impl Into<String>, message: impl Into<String>) -> Self {
        self.responses.insert(command.into(), Err(message.into()));
        self
    }

    /// Script the answers of the git queries issued during preflight
    pub fn with_git_state(self, branch: &str, remote: &str, clean: bool) -> Self {
        let runner = self
            .with_output("git rev-parse --abbrev-ref HEAD", branch)
            .with_output(
                "git rev-parse --symbolic-full-name --abbrev-ref @{u}",
                remote,
            );
        if clean {
            runner.with_output("git diff-index --name-only HEAD --exit-code", "")
        } else {
            runner.with_failure("git diff-index --name-only HEAD --exit-code", "package.json")
        }
    }

    /// Commands run so far, in order
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }
}

impl Default for MockRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for MockRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(command.to_string());
        }

        match self.responses.get(command) {
            Some(Ok(stdout)) => Ok(CommandOutput::new(stdout.clone())),
            Some(Err(message)) => Err(ReleaseError::task(command, Some(1), message.clone())),
            None => Ok(CommandOutput::default()),
        }
    }
}
