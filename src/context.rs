/// Per-process execution context, decided once at startup and handed to the
/// planner, the runner and the workflows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunContext {
    /// Display planned commands instead of running them
    pub dry_run: bool,
}

impl RunContext {
    pub fn new(dry_run: bool) -> Self {
        RunContext { dry_run }
    }

    pub fn dry_run() -> Self {
        RunContext { dry_run: true }
    }
}
