//! User interface module - interaction (prompts), formatting and progress.
//!
//! Separates concerns:
//! - `formatter` - Styled output functions
//! - `spinner` - Task progress indicator
//! - This module - Interactive prompts behind the [Prompter] trait

use std::cell::RefCell;
use std::io::{self, BufRead, BufReader};

use console::{style, Term};

use crate::error::{ReleaseError, Result};
use crate::resolver::Choice;

pub mod formatter;
pub mod spinner;

pub use formatter::{display_error, display_goodbye, display_introduction, display_violations};
pub use spinner::Spinner;

/// Validates free-form input, returning the message to show on rejection
pub type InputValidator<'a> = &'a dyn Fn(&str) -> std::result::Result<(), String>;

/// Operator interaction used by the workflows
pub trait Prompter {
    /// Pick one of the selectable `choices`; returns its index among
    /// selectable entries (separators are not counted).
    fn select(&self, message: &str, choices: &[Choice], default_index: usize) -> Result<usize>;

    /// Yes/no question; an empty answer means yes
    fn confirm(&self, message: &str) -> Result<bool>;

    /// Free-form answer, asked again until `validator` accepts it
    fn input(&self, message: &str, validator: InputValidator<'_>) -> Result<String>;
}

/// Prompts on stderr and reads answers line by line from stdin
///
/// Closed input is an error, never an answer.
pub struct TerminalPrompter {
    term: Term,
    input: RefCell<Box<dyn BufRead>>,
}

impl TerminalPrompter {
    pub fn new() -> Self {
        Self::with_input(BufReader::new(io::stdin()))
    }

    /// Read answers from `input` instead of stdin
    pub fn with_input(input: impl BufRead + 'static) -> Self {
        Self {
            term: Term::stderr(),
            input: RefCell::new(Box::new(input)),
        }
    }

    fn read_line(&self, prompt: &str) -> Result<String> {
        self.term.write_str(prompt)?;
        self.term.flush()?;

        let mut line = String::new();
        let read = self.input.borrow_mut().read_line(&mut line)?;
        if read == 0 {
            self.term.write_line("")?;
            return Err(ReleaseError::prompt("No answer given: input is closed"));
        }
        Ok(line.trim().to_string())
    }
}

impl Default for TerminalPrompter {
    fn default() -> Self {
        Self::new()
    }
}

impl Prompter for TerminalPrompter {
    fn select(&self, message: &str, choices: &[Choice], default_index: usize) -> Result<usize> {
        let count = choices.iter().filter(|c| c.as_selectable().is_some()).count();
        if count == 0 {
            return Err(ReleaseError::prompt("Nothing to choose from"));
        }

        self.term.write_line("")?;
        self.term.write_line(&style(message).bold().to_string())?;
        let mut number = 0;
        for choice in choices {
            match choice {
                Choice::Selectable(s) => {
                    number += 1;
                    let marker = if number - 1 == default_index { ">" } else { " " };
                    self.term.write_line(&format!(
                        "{} [{}] {}",
                        marker,
                        style(number).cyan().bold(),
                        s.label
                    ))?;
                }
                Choice::Separator => {
                    self.term.write_line(&format!("  {}", style("──────────────").dim()))?;
                }
            }
        }

        loop {
            let prompt = format!("Select (1-{}) [default: {}]: ", count, default_index + 1);
            let answer = self.read_line(&style(prompt).cyan().to_string())?;
            if answer.is_empty() {
                return Ok(default_index.min(count - 1));
            }
            match answer.parse::<usize>() {
                Ok(n) if n >= 1 && n <= count => return Ok(n - 1),
                _ => self.term.write_line(
                    &style(format!("Please enter a number between 1 and {}", count))
                        .red()
                        .to_string(),
                )?,
            }
        }
    }

    fn confirm(&self, message: &str) -> Result<bool> {
        self.term.write_line("")?;
        self.term.write_line(message)?;
        self.term.write_line("")?;

        let answer = self.read_line("Do you want to continue? (Y/n): ")?.to_lowercase();
        Ok(!(answer == "n" || answer == "no"))
    }

    fn input(&self, message: &str, validator: InputValidator<'_>) -> Result<String> {
        loop {
            let answer = self.read_line(&format!("{}: ", style(message).cyan()))?;
            match validator(&answer) {
                Ok(()) => return Ok(answer),
                Err(reason) => self.term.write_line(&style(reason).red().to_string())?,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::{ChoiceValue, Selectable};
    use std::io::Cursor;

    fn prompter(answers: &str) -> TerminalPrompter {
        TerminalPrompter::with_input(Cursor::new(answers.to_string()))
    }

    fn choices() -> Vec<Choice> {
        ["1.0.2", "1.1.0"]
            .iter()
            .map(|v| {
                Choice::Selectable(Selectable {
                    value: ChoiceValue::Version(semver::Version::parse(v).unwrap()),
                    short: v.to_string(),
                    label: format!("bump to {}", v),
                })
            })
            .chain(std::iter::once(Choice::Separator))
            .collect()
    }

    #[test]
    fn test_confirm_answers() {
        assert!(prompter("y\n").confirm("About to push...").unwrap());
        assert!(prompter("\n").confirm("About to push...").unwrap());
        assert!(!prompter("n\n").confirm("About to push...").unwrap());
        assert!(!prompter("No\n").confirm("About to push...").unwrap());
    }

    #[test]
    fn test_confirm_on_closed_input_is_error() {
        let err = prompter("").confirm("About to push...").unwrap_err();
        assert!(matches!(err, ReleaseError::Prompt(_)));
    }

    #[test]
    fn test_select_reprompts_until_valid() {
        let picked = prompter("7\nabc\n2\n").select("Pick", &choices(), 0).unwrap();
        assert_eq!(picked, 1);
        assert_eq!(prompter("\n").select("Pick", &choices(), 1).unwrap(), 1);
    }

    #[test]
    fn test_select_on_closed_input_is_error() {
        assert!(prompter("").select("Pick", &choices(), 0).is_err());
    }

    #[test]
    fn test_input_stops_when_input_closes() {
        let validator = |answer: &str| {
            if answer == "2.0.0" {
                Ok(())
            } else {
                Err("try again".to_string())
            }
        };
        assert_eq!(
            prompter("nope\n2.0.0\n").input("Version", &validator).unwrap(),
            "2.0.0"
        );
        let err = prompter("nope\n").input("Version", &validator).unwrap_err();
        assert!(matches!(err, ReleaseError::Prompt(_)));
    }
}
