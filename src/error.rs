use std::path::{Path, PathBuf};

use thiserror::Error;

/// Unified error type for bump-and-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unable to parse {}: {reason}", .path.display())]
    ManifestRead { path: PathBuf, reason: String },

    #[error("Unable to update {}: {reason}", .path.display())]
    ManifestWrite { path: PathBuf, reason: String },

    #[error("Invalid version: {0}")]
    InvalidVersion(String),

    #[error("Command `{command}` failed{}: {message}", status_suffix(.status))]
    TaskExecution {
        command: String,
        status: Option<i32>,
        message: String,
    },

    #[error("Prompt error: {0}")]
    Prompt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

fn status_suffix(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!(" with exit code {}", code),
        None => String::new(),
    }
}

/// Convenience type alias for Results in bump-and-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseError::Config(msg.into())
    }

    /// Create a version error with context
    pub fn version(msg: impl Into<String>) -> Self {
        ReleaseError::InvalidVersion(msg.into())
    }

    /// Create a prompt error with context
    pub fn prompt(msg: impl Into<String>) -> Self {
        ReleaseError::Prompt(msg.into())
    }

    pub fn manifest_read(path: &Path, reason: impl ToString) -> Self {
        ReleaseError::ManifestRead {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    pub fn manifest_write(path: &Path, reason: impl ToString) -> Self {
        ReleaseError::ManifestWrite {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }

    /// Create a task execution error for a shell command
    pub fn task(command: impl Into<String>, status: Option<i32>, message: impl Into<String>) -> Self {
        ReleaseError::TaskExecution {
            command: command.into(),
            status,
            message: message.into(),
        }
    }

    /// Short, human-facing detail of a failed command (stderr, or stdout when
    /// the command reported on stdout only).
    pub fn command_message(&self) -> Option<&str> {
        match self {
            ReleaseError::TaskExecution { message, .. } => Some(message.as_str()),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ReleaseError {
    fn from(err: toml::de::Error) -> Self {
        ReleaseError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseError::config("test config issue");
        assert_eq!(err.to_string(), "Configuration error: test config issue");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_task_error_display_with_status() {
        let err = ReleaseError::task("npm run test", Some(2), "tests failed");
        assert_eq!(
            err.to_string(),
            "Command `npm run test` failed with exit code 2: tests failed"
        );
    }

    #[test]
    fn test_task_error_display_without_status() {
        let err = ReleaseError::task("not-a-command", None, "killed by signal");
        assert_eq!(
            err.to_string(),
            "Command `not-a-command` failed: killed by signal"
        );
    }

    #[test]
    fn test_command_message_only_for_tasks() {
        let err = ReleaseError::task("git diff-index", Some(1), "package.json");
        assert_eq!(err.command_message(), Some("package.json"));
        assert_eq!(ReleaseError::version("x").command_message(), None);
    }

    #[test]
    fn test_manifest_errors_name_the_file() {
        let read = ReleaseError::manifest_read(Path::new("/tmp/package.json"), "bad json");
        assert!(read.to_string().contains("/tmp/package.json"));
        assert!(read.to_string().contains("bad json"));

        let write = ReleaseError::manifest_write(Path::new("lerna.json"), "read-only");
        assert!(write.to_string().starts_with("Unable to update lerna.json"));
    }

    #[test]
    fn test_toml_error_becomes_config_error() {
        let parse: std::result::Result<toml::Value, toml::de::Error> = toml::from_str("a = ");
        let err: ReleaseError = parse.unwrap_err().into();
        assert!(matches!(err, ReleaseError::Config(_)));
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseError::config("x"), "Configuration error"),
            (ReleaseError::version("x"), "Invalid version"),
            (ReleaseError::prompt("x"), "Prompt error"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
