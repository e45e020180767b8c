use crate::error::Result;
use std::fmt;
use std::sync::Arc;

/// The two workflows the tool drives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Bump,
    Release,
}

impl Workflow {
    pub fn name(&self) -> &'static str {
        match self {
            Workflow::Bump => "bump",
            Workflow::Release => "release",
        }
    }
}

/// In-process task body, invoked with the target version
#[derive(Clone)]
pub struct NativeAction(Arc<dyn Fn(&str) -> Result<()> + Send + Sync>);

impl NativeAction {
    pub fn new(f: impl Fn(&str) -> Result<()> + Send + Sync + 'static) -> Self {
        NativeAction(Arc::new(f))
    }

    pub fn call(&self, version: &str) -> Result<()> {
        (self.0)(version)
    }
}

impl fmt::Debug for NativeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("NativeAction(..)")
    }
}

/// What a planned task does when it runs
#[derive(Debug, Clone)]
pub enum Action {
    Shell(String),
    Native(NativeAction),
}

impl Action {
    /// Text echoed in dry-run mode
    pub fn describe(&self, name: &str) -> String {
        match self {
            Action::Shell(command) => command.clone(),
            Action::Native(_) => format!("[native] {}", name),
        }
    }

    pub fn as_shell(&self) -> Option<&str> {
        match self {
            Action::Shell(command) => Some(command),
            Action::Native(_) => None,
        }
    }
}

/// How the runner treats a task's failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskRole {
    Generic,
    /// `git commit` exits non-zero when there is nothing to commit; such a
    /// failure does not stop the run.
    Commit,
}

#[derive(Debug, Clone)]
pub struct PlannedTask {
    pub name: String,
    pub action: Action,
    pub verbose: bool,
    pub dry_run: bool,
    pub role: TaskRole,
}

/// Ordered tasks for one workflow run, plus the sentence shown before
/// asking for confirmation
#[derive(Debug, Clone)]
pub struct TaskPlan {
    pub tasks: Vec<PlannedTask>,
    pub instruction: String,
}

impl TaskPlan {
    pub fn new(tasks: Vec<PlannedTask>) -> Self {
        let names: Vec<&str> = tasks.iter().map(|t| t.name.as_str()).collect();
        let instruction = instruction_for(&names);
        TaskPlan { tasks, instruction }
    }

    pub fn names(&self) -> Vec<&str> {
        self.tasks.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// "a, b and c..."
pub fn instruction_for(names: &[&str]) -> String {
    let sentence = match names.split_last() {
        None => String::new(),
        Some((last, [])) => last.to_string(),
        Some((last, rest)) => format!("{} and {}", rest.join(", "), last),
    };
    format!("{}...", sentence)
}
