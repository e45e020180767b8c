use crate::error::{ReleaseError, Result};
use serde::Deserialize;
use std::fmt;

/// Placeholders a template may reference.
pub const PLACEHOLDERS: [&str; 2] = ["version", "type"];

/// Produces the commit message recorded for a version
pub trait CommitMessageStrategy {
    fn commit_message(&self, version: &str) -> String;
}

/// Produces the label shown for a next-version candidate
pub trait VersionLabelStrategy {
    fn label(&self, kind: &str, version: &str) -> String;
}

/// Label template (e.g., "[{type}] ... bump to next {type} ({version})")
///
/// Placeholders are checked when the template is built, so rendering never
/// fails.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Template {
    pattern: String,
}

fn check_placeholders(pattern: &str, allowed: &[&str]) -> Result<()> {
    let re = regex::Regex::new(r"\{([^{}]*)\}")
        .map_err(|e| ReleaseError::config(format!("Invalid placeholder pattern: {}", e)))?;
    for captures in re.captures_iter(pattern) {
        let name = captures.get(1).map(|m| m.as_str()).unwrap_or_default();
        if !allowed.contains(&name) {
            return Err(ReleaseError::config(format!(
                "Unknown placeholder '{{{}}}' in template '{}' (expected one of: {})",
                name,
                pattern,
                allowed
                    .iter()
                    .map(|p| format!("{{{}}}", p))
                    .collect::<Vec<_>>()
                    .join(", ")
            )));
        }
    }
    Ok(())
}

impl Template {
    /// Create a template, rejecting unknown `{placeholder}`s
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        check_placeholders(&pattern, &PLACEHOLDERS)?;
        Ok(Template { pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    /// Format a version and increment type according to the template
    /// Example: "[{type}] bump to {version}" -> "[minor] bump to 1.3.0"
    pub fn render(&self, kind: &str, version: &str) -> String {
        self.pattern
            .replace("{type}", kind)
            .replace("{version}", version)
    }
}

impl TryFrom<String> for Template {
    type Error = ReleaseError;

    fn try_from(pattern: String) -> Result<Self> {
        Template::new(pattern)
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.pattern)
    }
}

/// Commit message template; only `{version}` is accepted
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct CommitTemplate {
    pattern: String,
}

impl CommitTemplate {
    pub fn new(pattern: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        check_placeholders(&pattern, &["version"])?;
        Ok(CommitTemplate { pattern })
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }
}

impl TryFrom<String> for CommitTemplate {
    type Error = ReleaseError;

    fn try_from(pattern: String) -> Result<Self> {
        CommitTemplate::new(pattern)
    }
}

impl CommitMessageStrategy for CommitTemplate {
    fn commit_message(&self, version: &str) -> String {
        self.pattern.replace("{version}", version)
    }
}

impl VersionLabelStrategy for Template {
    fn label(&self, kind: &str, version: &str) -> String {
        self.render(kind, version)
    }
}

/// Label used when an option does not configure one
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneratedLabel;

impl VersionLabelStrategy for GeneratedLabel {
    fn label(&self, kind: &str, version: &str) -> String {
        if version.is_empty() {
            format!("[{}] ... enter a custom version", kind)
        } else {
            format!("[{}] ... bump to {}", kind, version)
        }
    }
}
