//! Pre-flight policy checks run before either workflow touches anything

use crate::config::Config;
use crate::domain::Workflow;
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::manifest::ProjectManifests;
use std::path::PathBuf;

pub const BRANCH_COMMAND: &str = "git rev-parse --abbrev-ref HEAD";
pub const REMOTE_COMMAND: &str = "git rev-parse --symbolic-full-name --abbrev-ref @{u}";
pub const DIRTY_COMMAND: &str = "git diff-index --name-only HEAD --exit-code";

/// Repository state captured by a successful pre-flight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub branch: String,
    pub remote: String,
    pub version: String,
    /// Workspace package globs, lerna mode only
    pub packages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Validation {
    Passed(ValidationResult),
    /// Every policy violation found, in check order
    Rejected(Vec<String>),
}

pub struct PreflightValidator<R: CommandRunner> {
    runner: R,
    project_dir: PathBuf,
}

impl<R: CommandRunner> PreflightValidator<R> {
    pub fn new(runner: R, project_dir: impl Into<PathBuf>) -> Self {
        PreflightValidator {
            runner,
            project_dir: project_dir.into(),
        }
    }

    /// Check branch, tracking remote and working tree against the policy.
    ///
    /// With `is_local_override` nothing is enforced and git state is read
    /// on a best-effort basis. Manifest problems are errors in both cases.
    pub fn validate(
        &self,
        config: &Config,
        workflow: Workflow,
        is_local_override: bool,
    ) -> Result<Validation> {
        let (version, packages) =
            ProjectManifests::new(&self.project_dir, config.bump.lerna_mode).current()?;

        let branch = if is_local_override {
            self.read_lenient(BRANCH_COMMAND)
        } else {
            self.runner.run(BRANCH_COMMAND)?.stdout
        };
        let remote = self.read_lenient(REMOTE_COMMAND);

        let result = ValidationResult {
            branch,
            remote,
            version,
            packages,
        };

        if is_local_override {
            tracing::debug!("local override, skipping pre-flight checks");
            return Ok(Validation::Passed(result));
        }

        let violations = self.violations(config, workflow, &result);
        if violations.is_empty() {
            Ok(Validation::Passed(result))
        } else {
            tracing::debug!(count = violations.len(), "pre-flight rejected");
            Ok(Validation::Rejected(violations))
        }
    }

    fn read_lenient(&self, command: &str) -> String {
        self.runner
            .run_ignoring_error(command)
            .map(|output| output.stdout)
            .unwrap_or_default()
    }

    fn violations(&self, config: &Config, workflow: Workflow, state: &ValidationResult) -> Vec<String> {
        let mut violations = Vec::new();

        if config.disallowed_branches.contains(&state.branch) {
            violations.push(format!(
                "Working branch must not be one of \"{}\".",
                config.disallowed_branches.join(",")
            ));
        } else if !config.allowed_branches.contains(&state.branch) {
            violations.push(format!(
                "Working branch must be one of \"{}\".",
                config.allowed_branches.join(",")
            ));
        }

        if !config.allowed_remotes.contains(&state.remote) {
            violations.push(format!(
                "Tracking remote must be one of \"{}\".",
                config.allowed_remotes.join(",")
            ));
        }

        if !config.is_local(workflow) {
            if let Err(e) = self.runner.run(DIRTY_COMMAND) {
                let mut message = "Working dir must be clean (no uncommitted files).".to_string();
                if let Some(files) = e.command_message().filter(|m| !m.is_empty()) {
                    message.push('\n');
                    message.push_str(files);
                }
                violations.push(message);
            }
        }

        violations
    }
}
