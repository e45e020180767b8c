//! Domain logic - pure rules independent of git, the terminal and the file system

pub mod prerelease;
pub mod task;
pub mod template;
pub mod version;

pub use prerelease::{Identifier, PreRelease};
pub use task::{Action, NativeAction, PlannedTask, TaskPlan, TaskRole, Workflow};
pub use template::{
    CommitMessageStrategy, CommitTemplate, GeneratedLabel, Template, VersionLabelStrategy,
};
pub use version::{increment, parse_version, IncrementKind};
