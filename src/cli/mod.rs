//! Command-line interface definitions.
//!
//! - `Cli`: argument definitions via clap
//! - `orchestration`: the bump and release workflows

pub mod orchestration;

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::context::RunContext;
use crate::domain::Workflow;

pub const DRY_RUN_ENV: &str = "BUMP_AND_RELEASE_DRY_RUN";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum WorkflowType {
    /// Record a new version and commit it
    Bump,
    /// Run release tasks, then commit, tag and push
    Release,
}

impl From<WorkflowType> for Workflow {
    fn from(value: WorkflowType) -> Self {
        match value {
            WorkflowType::Bump => Workflow::Bump,
            WorkflowType::Release => Workflow::Release,
        }
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "bump-and-release",
    version,
    about = "Bump the version of a package, or tag and push a release"
)]
pub struct Cli {
    #[arg(short = 't', long = "type", value_enum, help = "Workflow to run")]
    pub workflow: WorkflowType,

    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        env = DRY_RUN_ENV,
        help = "Display the commands instead of running them"
    )]
    pub dry_run: bool,

    #[arg(long, help = "Skip pre-flight checks and do not push")]
    pub local: bool,

    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

impl Cli {
    pub fn context(&self) -> RunContext {
        RunContext::new(self.dry_run)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_release() {
        let cli = Cli::try_parse_from(["bump-and-release", "-t", "release", "--local"]).unwrap();
        assert_eq!(cli.workflow, WorkflowType::Release);
        assert!(cli.local);
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_parse_bump_with_config() {
        let cli = Cli::try_parse_from([
            "bump-and-release",
            "--type",
            "bump",
            "--config",
            "release.toml",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(Workflow::from(cli.workflow), Workflow::Bump);
        assert_eq!(cli.config, Some(PathBuf::from("release.toml")));
        assert!(cli.context().dry_run);
    }

    #[test]
    fn test_type_is_required() {
        assert!(Cli::try_parse_from(["bump-and-release"]).is_err());
        assert!(Cli::try_parse_from(["bump-and-release", "-t", "ship"]).is_err());
    }
}
