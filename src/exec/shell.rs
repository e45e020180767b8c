use crate::error::{ReleaseError, Result};
use crate::exec::{CommandOutput, CommandRunner};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Runs command strings through the platform shell (`sh -c`, or `cmd /C` on
/// Windows), so configured tasks may use pipes and `&&`.
#[derive(Debug, Clone, Default)]
pub struct ShellRunner {
    working_dir: Option<PathBuf>,
}

impl ShellRunner {
    /// Runner executing in the current working directory
    pub fn new() -> Self {
        ShellRunner { working_dir: None }
    }

    /// Runner executing in `dir`
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        ShellRunner {
            working_dir: Some(dir.as_ref().to_path_buf()),
        }
    }

    fn shell_command(&self, command: &str) -> Command {
        #[cfg(windows)]
        let mut cmd = {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        };
        #[cfg(not(windows))]
        let mut cmd = {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        };

        if let Some(dir) = &self.working_dir {
            cmd.current_dir(dir);
        }
        cmd
    }
}

fn strip_trailing_newline(s: &str) -> &str {
    s.strip_suffix('\n')
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .unwrap_or(s)
}

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str) -> Result<CommandOutput> {
        tracing::debug!(command, "running");

        let output = self
            .shell_command(command)
            .output()
            .map_err(|e| ReleaseError::task(command, None, format!("failed to spawn: {}", e)))?;

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);

        if !output.status.success() {
            let message = if stderr.trim().is_empty() {
                stdout.trim()
            } else {
                stderr.trim()
            };
            return Err(ReleaseError::task(
                command,
                output.status.code(),
                message.to_string(),
            ));
        }

        Ok(CommandOutput {
            stdout: strip_trailing_newline(&stdout).to_string(),
            stderr: stderr.into_owned(),
        })
    }
}
