use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use bump_and_release::cli::orchestration::{self, WorkflowArgs, WorkflowOutcome};
use bump_and_release::cli::Cli;
use bump_and_release::config;
use bump_and_release::exec::ShellRunner;
use bump_and_release::ui::{self, TerminalPrompter};

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    match run(cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            ui::display_error(&format!("{:#}", e));
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("bump_and_release=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(cli: Cli) -> Result<WorkflowOutcome> {
    let project_dir = std::env::current_dir().context("Unable to read the current directory")?;

    let config = config::load_config(cli.config.as_deref(), &project_dir)
        .context("Error loading config")?;

    let args = WorkflowArgs {
        project_dir: project_dir.clone(),
        local: cli.local,
        ctx: cli.context(),
        show_progress: true,
    };

    let runner = ShellRunner::in_dir(&project_dir);
    let outcome = orchestration::run(
        cli.workflow.into(),
        &args,
        config,
        runner,
        &TerminalPrompter::new(),
    )?;

    Ok(outcome)
}
