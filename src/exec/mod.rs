//! Process execution abstraction layer
//!
//! Every external command the tool issues (git queries during preflight,
//! declared tasks, commit/tag/push) goes through the [CommandRunner] trait,
//! so workflows can be exercised without spawning processes.
//!
//! - [shell::ShellRunner]: runs command strings through the platform shell
//! - [mock::MockRunner]: scripted responses plus a call log, for tests
//!
//! ```rust
//! # use bump_and_release::exec::CommandRunner;
//! # fn example<R: CommandRunner>(runner: &R) -> bump_and_release::Result<()> {
//! let branch = runner.run("git rev-parse --abbrev-ref HEAD")?.stdout;
//! println!("on {}", branch);
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod shell;

pub use mock::MockRunner;
pub use shell::ShellRunner;

use crate::error::Result;

/// Captured output of a finished command
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Standard output, without its trailing newline
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(stdout: impl Into<String>) -> Self {
        CommandOutput {
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }
}

/// Executes shell command strings
///
/// ## Error Handling
///
/// A command that cannot be spawned or exits non-zero yields
/// [crate::error::ReleaseError::TaskExecution] with the exit status and the
/// command's stderr (stdout when stderr is empty).
pub trait CommandRunner: Send + Sync {
    /// Run a command to completion and capture its output
    fn run(&self, command: &str) -> Result<CommandOutput>;

    /// Run a command, treating failure as "no output"
    ///
    /// # Returns
    /// * `Some(CommandOutput)` - The command succeeded
    /// * `None` - The command failed; the error is logged and dropped
    fn run_ignoring_error(&self, command: &str) -> Option<CommandOutput> {
        match self.run(command) {
            Ok(output) => Some(output),
            Err(e) => {
                tracing::debug!(command, error = %e, "ignoring command failure");
                None
            }
        }
    }
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        (**self).run(command)
    }
}
