use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Progress indicator shown while tasks run
pub struct Spinner {
    bar: ProgressBar,
}

impl Spinner {
    /// A visible spinner on stderr
    pub fn start(message: &str) -> Self {
        let bar = ProgressBar::new_spinner();
        if let Ok(template) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            bar.set_style(template.tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏ "));
        }
        bar.set_message(message.to_string());
        bar.enable_steady_tick(Duration::from_millis(80));
        Spinner { bar }
    }

    /// A spinner that draws nothing
    pub fn hidden() -> Self {
        Spinner {
            bar: ProgressBar::hidden(),
        }
    }

    pub fn set_message(&self, message: &str) {
        self.bar.set_message(message.to_string());
    }

    /// Print a line above the spinner
    pub fn println(&self, line: &str) {
        if self.bar.is_hidden() {
            println!("{}", line);
        } else {
            self.bar.println(line);
        }
    }

    pub fn succeed(&self, message: &str) {
        self.bar
            .finish_with_message(format!("{} {}", style("✔").green(), message));
    }

    pub fn fail(&self, message: &str) {
        self.bar
            .abandon_with_message(format!("{} {}", style("✖").red(), message));
    }
}
