//! Next-version candidates offered by the `bump` workflow

use crate::config::{Config, NextVersionOption, OptionKind};
use crate::domain::{increment, parse_version, GeneratedLabel, VersionLabelStrategy};
use crate::error::{ReleaseError, Result};
use semver::Version;

/// What picking a choice yields
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChoiceValue {
    Version(Version),
    /// The operator types the version in
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selectable {
    pub value: ChoiceValue,
    /// Short form echoed once picked: the resolved version rather than the
    /// option type, or "custom"
    pub short: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Selectable(Selectable),
    Separator,
}

impl Choice {
    pub fn as_selectable(&self) -> Option<&Selectable> {
        match self {
            Choice::Selectable(s) => Some(s),
            Choice::Separator => None,
        }
    }
}

/// Ordered choices; `default_index` counts selectable entries only
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionChoices {
    pub choices: Vec<Choice>,
    pub default_index: usize,
}

impl VersionChoices {
    pub fn selectable(&self) -> Vec<&Selectable> {
        self.choices.iter().filter_map(Choice::as_selectable).collect()
    }

    /// The selectable choice at `index` (separators not counted)
    pub fn get(&self, index: usize) -> Option<&Selectable> {
        self.choices
            .iter()
            .filter_map(Choice::as_selectable)
            .nth(index)
    }
}

fn label_for(option: &NextVersionOption, version: &str) -> String {
    let kind = option.kind.as_str();
    match &option.label {
        Some(template) => template.label(kind, version),
        None => GeneratedLabel.label(kind, version),
    }
}

/// Compute the candidates offered for `current`, in configured order.
///
/// Disabled options are skipped. Errors when `current` is not a valid
/// version, when an option has an unknown type, or when a pre-release
/// identifier is rejected.
pub fn resolve(current: &str, config: &Config) -> Result<VersionChoices> {
    let current = parse_version(current)?;
    let mut choices = Vec::new();
    let mut default_index = None;
    let mut selectable = 0;

    for option in config.bump.next_possible.iter().filter(|o| o.enabled) {
        let choice = match &option.kind {
            OptionKind::Separator => {
                choices.push(Choice::Separator);
                continue;
            }
            OptionKind::Increment(kind) => {
                let next = increment(&current, *kind, option.identifier.as_deref())?;
                let short = next.to_string();
                Selectable {
                    label: label_for(option, &short),
                    value: ChoiceValue::Version(next),
                    short,
                }
            }
            OptionKind::Custom => Selectable {
                value: ChoiceValue::Custom,
                short: "custom".to_string(),
                label: label_for(option, ""),
            },
            OptionKind::Unknown(raw) => {
                return Err(ReleaseError::version(format!(
                    "Unknown next version type: '{}'",
                    raw
                )));
            }
        };

        if option.default && default_index.is_none() {
            default_index = Some(selectable);
        }
        selectable += 1;
        choices.push(Choice::Selectable(choice));
    }

    tracing::debug!(count = choices.len(), ?default_index, "resolved version choices");
    Ok(VersionChoices {
        choices,
        default_index: default_index.unwrap_or(0),
    })
}
