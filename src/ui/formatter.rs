//! Styled output functions.
//!
//! Everything here prints; nothing here reads input.

use console::style;

use crate::preflight::ValidationResult;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
}

/// Print every pre-flight violation in red, as one block.
pub fn display_violations(violations: &[String]) {
    println!();
    for violation in violations {
        println!("{}", style(violation).red());
    }
    println!();
}

/// Describe the repository state before anything is asked.
pub fn display_introduction(state: &ValidationResult, dry_run: bool) {
    println!();
    println!("Current version is {}", style(&state.version).cyan());
    println!("Current branch is {}", style(&state.branch).cyan());
    println!("Current tracking remote is {}", style(&state.remote).cyan());
    if !state.packages.is_empty() {
        println!("Workspace packages are {}", style(state.packages.join(", ")).cyan());
    }
    println!();
    if dry_run {
        println!("Dry-run mode is ON");
        println!();
    }
}

pub fn display_goodbye() {
    println!("\nBye then!");
}
