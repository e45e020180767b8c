//! Workflow orchestration
//!
//! Drives the `bump` and `release` workflows over their collaborators: a
//! [CommandRunner] for every external command and a [Prompter] for the
//! operator. Neither workflow depends on clap, so both can be called
//! programmatically.

use std::path::PathBuf;

use crate::config::Config;
use crate::context::RunContext;
use crate::domain::{parse_version, Workflow};
use crate::error::{ReleaseError, Result};
use crate::exec::CommandRunner;
use crate::manifest::ProjectManifests;
use crate::planner;
use crate::preflight::{PreflightValidator, Validation, ValidationResult};
use crate::resolver::{self, ChoiceValue};
use crate::runner::TaskRunner;
use crate::ui::{self, Prompter, Spinner};

pub const SELECT_MESSAGE: &str = "Please choose one of the following options for the next version";
pub const CUSTOM_MESSAGE: &str = "Type a valid semver version";
pub const INVALID_CUSTOM_MESSAGE: &str = "Please enter a valid semver version, or <CTRL-C> to quit...";

/// Arguments shared by both workflows
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowArgs {
    /// Directory holding the manifests
    pub project_dir: PathBuf,

    /// Force the workflow's `local` flag and skip pre-flight checks
    pub local: bool,

    pub ctx: RunContext,

    /// Draw a spinner while tasks run
    pub show_progress: bool,
}

impl WorkflowArgs {
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        WorkflowArgs {
            project_dir: project_dir.into(),
            local: false,
            ctx: RunContext::default(),
            show_progress: false,
        }
    }

    fn spinner(&self, message: &str) -> Spinner {
        if self.show_progress {
            Spinner::start(message)
        } else {
            Spinner::hidden()
        }
    }
}

/// How a workflow run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowOutcome {
    Completed,
    /// Rejected by pre-flight, or declined by the operator
    Aborted,
    /// A task failed
    Failed,
}

impl WorkflowOutcome {
    pub fn exit_code(&self) -> u8 {
        match self {
            WorkflowOutcome::Completed | WorkflowOutcome::Aborted => 0,
            WorkflowOutcome::Failed => 1,
        }
    }
}

fn preflight<R: CommandRunner>(
    args: &WorkflowArgs,
    config: &mut Config,
    workflow: Workflow,
    runner: &R,
) -> Result<Option<ValidationResult>> {
    if args.local {
        config.set_local(workflow, true);
    }

    let validator = PreflightValidator::new(runner, &args.project_dir);
    match validator.validate(config, workflow, args.local)? {
        Validation::Passed(state) => {
            ui::display_introduction(&state, args.ctx.dry_run);
            Ok(Some(state))
        }
        Validation::Rejected(violations) => {
            ui::display_violations(&violations);
            Ok(None)
        }
    }
}

fn validate_custom_version(answer: &str) -> std::result::Result<(), String> {
    if !answer.is_empty() && parse_version(answer).is_ok() {
        Ok(())
    } else {
        Err(INVALID_CUSTOM_MESSAGE.to_string())
    }
}

fn pick_version<P: Prompter>(current: &str, config: &Config, prompter: &P) -> Result<String> {
    let choices = resolver::resolve(current, config)?;
    let index = prompter.select(SELECT_MESSAGE, &choices.choices, choices.default_index)?;
    let picked = choices
        .get(index)
        .ok_or_else(|| ReleaseError::prompt(format!("No choice at index {}", index)))?;

    match &picked.value {
        ChoiceValue::Version(version) => Ok(version.to_string()),
        ChoiceValue::Custom => {
            let answer = prompter.input(CUSTOM_MESSAGE, &validate_custom_version)?;
            Ok(parse_version(&answer)?.to_string())
        }
    }
}

/// Compute a new version, record it in the manifest, then commit (and push)
/// it.
pub fn bump<R: CommandRunner, P: Prompter>(
    args: &WorkflowArgs,
    mut config: Config,
    runner: R,
    prompter: &P,
) -> Result<WorkflowOutcome> {
    let Some(state) = preflight(args, &mut config, Workflow::Bump, &runner)? else {
        return Ok(WorkflowOutcome::Aborted);
    };

    let target = pick_version(&state.version, &config, prompter)?;
    let go = prompter.confirm(&format!(
        "About to bump version from {} to {}",
        state.version, target
    ))?;
    if !go {
        ui::display_goodbye();
        return Ok(WorkflowOutcome::Aborted);
    }

    let manifests = ProjectManifests::new(&args.project_dir, config.bump.lerna_mode);
    let manifest_path = manifests.version_manifest_path();
    let manifest_name = manifest_path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let spinner = args.spinner(&format!("Updating {}...", manifest_name));
    if args.ctx.dry_run {
        spinner.println(&format!("set \"version\" to \"{}\" in {}", target, manifest_name));
    } else {
        manifests.write_version(&target)?;
    }

    let plan = planner::plan(&config, &target, Workflow::Bump, args.ctx);
    let report = TaskRunner::new(&runner).run(&plan.tasks, &target, &spinner);
    if !report.succeeded() {
        return Ok(WorkflowOutcome::Failed);
    }

    spinner.succeed("Version bump complete!");
    Ok(WorkflowOutcome::Completed)
}

/// Run the declared release tasks, then commit, tag and push the current
/// version.
pub fn release<R: CommandRunner, P: Prompter>(
    args: &WorkflowArgs,
    mut config: Config,
    runner: R,
    prompter: &P,
) -> Result<WorkflowOutcome> {
    let Some(state) = preflight(args, &mut config, Workflow::Release, &runner)? else {
        return Ok(WorkflowOutcome::Aborted);
    };

    let plan = planner::plan(&config, &state.version, Workflow::Release, args.ctx);
    if !prompter.confirm(&format!("About to {}", plan.instruction))? {
        ui::display_goodbye();
        return Ok(WorkflowOutcome::Aborted);
    }

    let spinner = args.spinner("Starting release tasks...");
    let report = TaskRunner::new(&runner).run(&plan.tasks, &state.version, &spinner);
    if !report.succeeded() {
        return Ok(WorkflowOutcome::Failed);
    }

    spinner.succeed("Release task(s) complete!");
    Ok(WorkflowOutcome::Completed)
}

/// Run `workflow`
pub fn run<R: CommandRunner, P: Prompter>(
    workflow: Workflow,
    args: &WorkflowArgs,
    config: Config,
    runner: R,
    prompter: &P,
) -> Result<WorkflowOutcome> {
    tracing::debug!(workflow = workflow.name(), dry_run = args.ctx.dry_run, local = args.local, "starting workflow");
    match workflow {
        Workflow::Bump => bump(args, config, runner, prompter),
        Workflow::Release => release(args, config, runner, prompter),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_workflow_args_defaults() {
        let args = WorkflowArgs::new("/tmp/project");
        assert_eq!(args.project_dir, PathBuf::from("/tmp/project"));
        assert!(!args.local);
        assert!(!args.ctx.dry_run);
        assert!(!args.show_progress);
    }

    #[test]
    fn test_exit_codes() {
        assert_eq!(WorkflowOutcome::Completed.exit_code(), 0);
        assert_eq!(WorkflowOutcome::Aborted.exit_code(), 0);
        assert_eq!(WorkflowOutcome::Failed.exit_code(), 1);
    }

    #[test]
    fn test_validate_custom_version() {
        assert!(validate_custom_version("2.0.0-beta.1").is_ok());
        assert!(validate_custom_version("v3.0.0").is_ok());
        assert_eq!(
            validate_custom_version("").unwrap_err(),
            INVALID_CUSTOM_MESSAGE
        );
        assert!(validate_custom_version("next").is_err());
    }
}
