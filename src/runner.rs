//! Sequential execution of a task plan

use crate::domain::{Action, PlannedTask, TaskRole};
use crate::error::ReleaseError;
use crate::exec::CommandRunner;
use crate::planner::PUSH_TASK;
use crate::ui::Spinner;

/// What happened to one task
#[derive(Debug)]
pub enum TaskOutcome {
    /// Dry-run: the command was displayed, not run
    DryRun { display: String },
    /// `surfaced` is set when the output was printed (verbose tasks)
    Succeeded { stdout: String, surfaced: bool },
    /// Failed, but the failure does not stop the run
    Tolerated { error: ReleaseError },
    Failed { error: ReleaseError },
    /// Not run because an earlier task failed
    Skipped,
}

#[derive(Debug)]
pub struct TaskRecord {
    pub name: String,
    pub outcome: TaskOutcome,
}

/// Per-task outcomes of one run, in plan order
#[derive(Debug, Default)]
pub struct RunReport {
    pub records: Vec<TaskRecord>,
}

impl RunReport {
    pub fn succeeded(&self) -> bool {
        !self
            .records
            .iter()
            .any(|r| matches!(r.outcome, TaskOutcome::Failed { .. }))
    }

    pub fn outcome(&self, name: &str) -> Option<&TaskOutcome> {
        self.records
            .iter()
            .find(|r| r.name == name)
            .map(|r| &r.outcome)
    }
}

/// Spinner text for a task: "Pushing to remote..." or the capitalized name
pub fn progress_message(name: &str) -> String {
    if name.eq_ignore_ascii_case(PUSH_TASK) {
        return "Pushing to remote...".to_string();
    }
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub struct TaskRunner<R: CommandRunner> {
    runner: R,
}

impl<R: CommandRunner> TaskRunner<R> {
    pub fn new(runner: R) -> Self {
        TaskRunner { runner }
    }

    /// Run `tasks` in order.
    ///
    /// Dry-run tasks are always displayed. Once a task fails, the remaining
    /// real tasks are skipped; a failing commit is tolerated.
    pub fn run(&self, tasks: &[PlannedTask], version: &str, spinner: &Spinner) -> RunReport {
        let mut report = RunReport::default();
        let mut failed = false;

        for task in tasks {
            spinner.set_message(&progress_message(&task.name));

            let outcome = if task.dry_run {
                let display = task.action.describe(&task.name);
                spinner.println(&display);
                TaskOutcome::DryRun { display }
            } else if failed {
                TaskOutcome::Skipped
            } else {
                tracing::debug!(task = %task.name, "running task");
                match self.execute(task, version) {
                    Ok(stdout) => {
                        let surfaced = task.verbose && !stdout.is_empty();
                        if surfaced {
                            spinner.println(&stdout);
                        }
                        TaskOutcome::Succeeded { stdout, surfaced }
                    }
                    Err(error) if task.role == TaskRole::Commit => {
                        tracing::debug!(task = %task.name, %error, "tolerating commit failure");
                        TaskOutcome::Tolerated { error }
                    }
                    Err(error) => {
                        spinner.fail(&format!("Command {} failed:\n{}", task.name, error));
                        failed = true;
                        TaskOutcome::Failed { error }
                    }
                }
            };

            report.records.push(TaskRecord {
                name: task.name.clone(),
                outcome,
            });
        }

        report
    }

    fn execute(&self, task: &PlannedTask, version: &str) -> crate::error::Result<String> {
        match &task.action {
            Action::Shell(command) => self.runner.run(command).map(|output| output.stdout),
            Action::Native(native) => native.call(version).map(|_| String::new()),
        }
    }
}
