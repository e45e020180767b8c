pub mod merge;

use crate::domain::{CommitTemplate, IncrementKind, NativeAction, Template, Workflow};
use crate::error::{ReleaseError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

pub use merge::merge;

/// Project-level configuration file, looked up in the invocation directory
pub const CONFIG_FILE_NAME: &str = ".bump-and-release.toml";

/// User-level configuration file, looked up in the platform config directory
pub const USER_CONFIG_FILE_NAME: &str = "bump-and-release.toml";

const DEFAULTS: &str = include_str!("defaults.toml");

/// Represents the complete (merged) configuration for bump-and-release.
///
/// Contains the branch/remote policy plus the settings of both workflows.
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub allowed_branches: Vec<String>,

    #[serde(default)]
    pub disallowed_branches: Vec<String>,

    #[serde(default)]
    pub allowed_remotes: Vec<String>,

    pub bump: BumpConfig,

    pub release: ReleaseConfig,
}

/// Settings of the `bump` workflow
#[derive(Debug, Deserialize, Clone)]
pub struct BumpConfig {
    #[serde(default)]
    pub local: bool,

    /// Read and write the version from the workspace manifest (`lerna.json`)
    #[serde(default)]
    pub lerna_mode: bool,

    pub commit_message: CommitTemplate,

    #[serde(default)]
    pub prebump_tasks: Vec<TaskSpec>,

    #[serde(default)]
    pub next_possible: Vec<NextVersionOption>,
}

/// Settings of the `release` workflow
#[derive(Debug, Deserialize, Clone)]
pub struct ReleaseConfig {
    #[serde(default)]
    pub local: bool,

    pub commit_message: CommitTemplate,

    #[serde(default)]
    pub prerelease: Vec<TaskSpec>,

    pub tag: TagConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct TagConfig {
    pub enabled: bool,

    #[serde(default)]
    pub prefix: String,
}

/// What a next-version option offers
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(from = "String")]
pub enum OptionKind {
    Increment(IncrementKind),
    /// Free-form version typed by the operator
    Custom,
    /// Visual divider in the choice list
    Separator,
    /// Not a recognised type; rejected when versions are resolved
    Unknown(String),
}

impl OptionKind {
    pub fn as_str(&self) -> &str {
        match self {
            OptionKind::Increment(kind) => kind.as_str(),
            OptionKind::Custom => "custom",
            OptionKind::Separator => "separator",
            OptionKind::Unknown(raw) => raw,
        }
    }
}

impl From<String> for OptionKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "custom" => OptionKind::Custom,
            "separator" => OptionKind::Separator,
            other => IncrementKind::from_str(other)
                .map(OptionKind::Increment)
                .unwrap_or(OptionKind::Unknown(raw)),
        }
    }
}

fn enabled_by_default() -> bool {
    true
}

/// A candidate offered when picking the next version
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NextVersionOption {
    #[serde(rename = "type")]
    pub kind: OptionKind,

    /// Pre-release identifier (e.g., "beta") for the pre* kinds
    #[serde(default)]
    pub identifier: Option<String>,

    #[serde(default)]
    pub position: Option<i64>,

    #[serde(default = "enabled_by_default")]
    pub enabled: bool,

    #[serde(default)]
    pub default: bool,

    #[serde(default)]
    pub label: Option<Template>,
}

impl NextVersionOption {
    pub fn new(kind: OptionKind) -> Self {
        NextVersionOption {
            kind,
            identifier: None,
            position: None,
            enabled: true,
            default: false,
            label: None,
        }
    }
}

/// Command carried by a declared task
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "String")]
pub enum TaskCommand {
    Shell(String),
    Native(NativeAction),
}

impl From<String> for TaskCommand {
    fn from(command: String) -> Self {
        TaskCommand::Shell(command)
    }
}

/// A caller-declared task run before the built-in git steps
#[derive(Debug, Deserialize, Clone)]
pub struct TaskSpec {
    #[serde(default)]
    pub name: Option<String>,

    pub command: TaskCommand,

    #[serde(default)]
    pub verbose: bool,
}

impl TaskSpec {
    pub fn shell(command: impl Into<String>) -> Self {
        TaskSpec {
            name: None,
            command: TaskCommand::Shell(command.into()),
            verbose: false,
        }
    }

    pub fn native(
        name: impl Into<String>,
        f: impl Fn(&str) -> Result<()> + Send + Sync + 'static,
    ) -> Self {
        TaskSpec {
            name: Some(name.into()),
            command: TaskCommand::Native(NativeAction::new(f)),
            verbose: false,
        }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Name shown to the operator: the declared name, else the shell command.
    pub fn display_name(&self) -> String {
        match (&self.name, &self.command) {
            (Some(name), _) => name.clone(),
            (None, TaskCommand::Shell(command)) => command.clone(),
            (None, TaskCommand::Native(_)) => "native task".to_string(),
        }
    }
}

impl Config {
    /// Build the typed configuration from a merged document.
    pub fn from_document(document: toml::Value) -> Result<Self> {
        document
            .try_into::<Config>()
            .map_err(|e| ReleaseError::config(e.to_string()))
    }

    /// Merge a user TOML document over the defaults and build the result.
    pub fn from_toml_str(user: &str) -> Result<Self> {
        let user: toml::Value = toml::Value::Table(toml::from_str(user)?);
        Self::from_document(merge(&default_document()?, &user))
    }

    pub fn is_local(&self, workflow: Workflow) -> bool {
        match workflow {
            Workflow::Bump => self.bump.local,
            Workflow::Release => self.release.local,
        }
    }

    pub fn set_local(&mut self, workflow: Workflow, local: bool) {
        match workflow {
            Workflow::Bump => self.bump.local = local,
            Workflow::Release => self.release.local = local,
        }
    }

    pub fn commit_message(&self, workflow: Workflow) -> &CommitTemplate {
        match workflow {
            Workflow::Bump => &self.bump.commit_message,
            Workflow::Release => &self.release.commit_message,
        }
    }

    /// Tasks declared to run ahead of the built-in git steps.
    pub fn declared_tasks(&self, workflow: Workflow) -> &[TaskSpec] {
        match workflow {
            Workflow::Bump => &self.bump.prebump_tasks,
            Workflow::Release => &self.release.prerelease,
        }
    }
}

/// The built-in configuration document every user document is merged over.
pub fn default_document() -> Result<toml::Value> {
    Ok(toml::Value::Table(toml::from_str(DEFAULTS)?))
}

/// Locates the user configuration file, if any.
///
/// Lookup order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `.bump-and-release.toml` in the project directory
/// 3. `bump-and-release.toml` in the user config directory
pub fn find_config_file(config_path: Option<&Path>, project_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = config_path {
        return Some(project_dir.join(path));
    }

    let local = project_dir.join(CONFIG_FILE_NAME);
    if local.exists() {
        return Some(local);
    }

    dirs::config_dir()
        .map(|dir| dir.join(USER_CONFIG_FILE_NAME))
        .filter(|path| path.exists())
}

/// Reads the user configuration document, or an empty document when no file
/// is found.
pub fn load_user_document(config_path: Option<&Path>, project_dir: &Path) -> Result<toml::Value> {
    let Some(path) = find_config_file(config_path, project_dir) else {
        tracing::debug!("no configuration file found, using defaults");
        return Ok(toml::Value::Table(toml::Table::new()));
    };

    tracing::debug!(path = %path.display(), "reading configuration");
    let content = fs::read_to_string(&path).map_err(|e| {
        ReleaseError::config(format!("Unable to read config file {}: {}", path.display(), e))
    })?;
    let table: toml::Table = toml::from_str(&content).map_err(|e| {
        ReleaseError::config(format!("Unable to parse config file {}: {}", path.display(), e))
    })?;

    Ok(toml::Value::Table(table))
}

/// Loads the user configuration and merges it over the defaults.
///
/// # Returns
/// * `Ok(Config)` - Merged configuration
/// * `Err` - If a file exists but cannot be read, parsed or validated
pub fn load_config(config_path: Option<&Path>, project_dir: &Path) -> Result<Config> {
    let user = load_user_document(config_path, project_dir)?;
    Config::from_document(merge(&default_document()?, &user))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_parse() {
        let config = Config::from_toml_str("").unwrap();
        assert_eq!(config.allowed_branches, vec!["master"]);
        assert!(config.disallowed_branches.is_empty());
        assert_eq!(config.allowed_remotes.len(), 3);
        assert!(!config.bump.local);
        assert!(!config.bump.lerna_mode);
        assert!(config.release.tag.enabled);
        assert_eq!(config.release.tag.prefix, "v");
        assert_eq!(
            config.release.commit_message.as_str(),
            "chore: tagging release {version}"
        );
    }

    #[test]
    fn test_default_next_possible_order() {
        let config = Config::from_toml_str("").unwrap();
        let kinds: Vec<&str> = config
            .bump
            .next_possible
            .iter()
            .map(|o| o.kind.as_str())
            .collect();
        assert_eq!(kinds, vec!["patch", "minor", "major", "custom"]);
        assert!(config.bump.next_possible.iter().all(|o| o.enabled && !o.default));
    }

    #[test]
    fn test_option_kind_from_string() {
        assert_eq!(
            OptionKind::from("prepatch".to_string()),
            OptionKind::Increment(IncrementKind::Prepatch)
        );
        assert_eq!(OptionKind::from("custom".to_string()), OptionKind::Custom);
        assert_eq!(OptionKind::from("separator".to_string()), OptionKind::Separator);
        assert_eq!(
            OptionKind::from("huge".to_string()),
            OptionKind::Unknown("huge".to_string())
        );
    }

    #[test]
    fn test_task_spec_display_name() {
        assert_eq!(TaskSpec::shell("npm run test").display_name(), "npm run test");
        assert_eq!(
            TaskSpec::shell("npm run changelog")
                .named("generate changelog")
                .display_name(),
            "generate changelog"
        );
        assert_eq!(TaskSpec::native("notes", |_| Ok(())).display_name(), "notes");
    }

    #[test]
    fn test_task_spec_from_toml() {
        let config = Config::from_toml_str(
            r#"
[[release.prerelease]]
command = "npm run test"

[[release.prerelease]]
name = "run bundlesize"
command = "npm run bundlesize"
verbose = true
"#,
        )
        .unwrap();
        let tasks = &config.release.prerelease;
        assert_eq!(tasks.len(), 2);
        assert!(matches!(&tasks[0].command, TaskCommand::Shell(c) if c == "npm run test"));
        assert!(!tasks[0].verbose);
        assert!(tasks[1].verbose);
    }

    #[test]
    fn test_invalid_template_is_config_error() {
        let err = Config::from_toml_str("[release]\ncommit_message = \"tag {tag}\"").unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }

    #[test]
    fn test_type_placeholder_in_commit_message_is_config_error() {
        let err = Config::from_toml_str("[bump]\ncommit_message = \"{type}: {version}\"").unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }

    #[test]
    fn test_wrong_shape_is_config_error() {
        let err = Config::from_toml_str("bump = 3").unwrap_err();
        assert!(matches!(err, ReleaseError::Config(_)));
    }

    #[test]
    fn test_local_accessors() {
        let mut config = Config::from_toml_str("[release]\nlocal = true").unwrap();
        assert!(config.is_local(Workflow::Release));
        assert!(!config.is_local(Workflow::Bump));
        config.set_local(Workflow::Bump, true);
        assert!(config.is_local(Workflow::Bump));
    }
}
