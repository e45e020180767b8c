//! Compilation of a workflow into its ordered task list

use crate::config::{Config, TaskCommand, TaskSpec};
use crate::context::RunContext;
use crate::domain::{Action, CommitMessageStrategy, PlannedTask, TaskPlan, TaskRole, Workflow};

pub const STAGE_TASK: &str = "git stage";
pub const COMMIT_TASK: &str = "git commit";
pub const STAGE_AND_COMMIT_TASK: &str = "git stage and commit";
pub const TAG_TASK: &str = "tag";
pub const PUSH_TASK: &str = "push";

/// Build the tasks for `workflow` targeting `version`.
///
/// Order: declared tasks, then stage/commit, then tag (release only, when
/// enabled), then push unless the workflow is local.
pub fn plan(config: &Config, version: &str, workflow: Workflow, ctx: RunContext) -> TaskPlan {
    let task = |name: &str, command: String, role: TaskRole| PlannedTask {
        name: name.to_string(),
        action: Action::Shell(command),
        verbose: false,
        dry_run: ctx.dry_run,
        role,
    };

    let mut tasks: Vec<PlannedTask> = config
        .declared_tasks(workflow)
        .iter()
        .map(|declared_task| declared(declared_task, ctx))
        .collect();

    let message = escape_double_quoted(&config.commit_message(workflow).commit_message(version));
    let tag_enabled = workflow == Workflow::Release && config.release.tag.enabled;

    match workflow {
        Workflow::Bump => tasks.push(task(
            STAGE_AND_COMMIT_TASK,
            format!("git add -A && git commit -a -m \"{}\"", message),
            TaskRole::Generic,
        )),
        Workflow::Release => {
            tasks.push(task(STAGE_TASK, "git add -A".to_string(), TaskRole::Generic));
            tasks.push(task(
                COMMIT_TASK,
                format!("git commit -a -m \"{}\"", message),
                TaskRole::Commit,
            ));
        }
    }

    if tag_enabled {
        tasks.push(task(
            TAG_TASK,
            format!(
                "git tag -a {}{} -m \"version {}\"",
                config.release.tag.prefix, version, version
            ),
            TaskRole::Generic,
        ));
    }

    if !config.is_local(workflow) {
        let push = if tag_enabled {
            "git push --no-verify && git push --tags --no-verify"
        } else {
            "git push --no-verify"
        };
        tasks.push(task(PUSH_TASK, push.to_string(), TaskRole::Generic));
    }

    let plan = TaskPlan::new(tasks);
    tracing::debug!(workflow = workflow.name(), tasks = ?plan.names(), "planned tasks");
    plan
}

/// Escape text for use inside a double-quoted `sh` word.
pub fn escape_double_quoted(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '"' | '$' | '`') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

fn declared(spec: &TaskSpec, ctx: RunContext) -> PlannedTask {
    let action = match &spec.command {
        TaskCommand::Shell(command) => Action::Shell(command.clone()),
        TaskCommand::Native(native) => Action::Native(native.clone()),
    };
    PlannedTask {
        name: spec.display_name(),
        action,
        verbose: spec.verbose,
        dry_run: ctx.dry_run,
        role: TaskRole::Generic,
    }
}
