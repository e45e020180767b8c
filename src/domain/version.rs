use crate::domain::prerelease::PreRelease;
use crate::error::{ReleaseError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;
use std::str::FromStr;

/// Kind of version increment offered to the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IncrementKind {
    Major,
    Minor,
    Patch,
    Premajor,
    Preminor,
    Prepatch,
    Prerelease,
}

impl IncrementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            IncrementKind::Major => "major",
            IncrementKind::Minor => "minor",
            IncrementKind::Patch => "patch",
            IncrementKind::Premajor => "premajor",
            IncrementKind::Preminor => "preminor",
            IncrementKind::Prepatch => "prepatch",
            IncrementKind::Prerelease => "prerelease",
        }
    }
}

impl FromStr for IncrementKind {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "major" => Ok(IncrementKind::Major),
            "minor" => Ok(IncrementKind::Minor),
            "patch" => Ok(IncrementKind::Patch),
            "premajor" => Ok(IncrementKind::Premajor),
            "preminor" => Ok(IncrementKind::Preminor),
            "prepatch" => Ok(IncrementKind::Prepatch),
            "prerelease" => Ok(IncrementKind::Prerelease),
            other => Err(ReleaseError::version(format!(
                "Unknown increment type: '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for IncrementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse a version the way npm tooling does: surrounding whitespace and a
/// leading `v` or `=` are ignored.
pub fn parse_version(raw: &str) -> Result<Version> {
    let clean = raw.trim().trim_start_matches('=').trim_start_matches(['v', 'V']);
    Version::parse(clean)
        .map_err(|e| ReleaseError::version(format!("'{}' is not a valid semver version: {}", raw, e)))
}

fn bumped(n: u64, part: &str) -> Result<u64> {
    n.checked_add(1)
        .ok_or_else(|| ReleaseError::version(format!("{} version {} cannot be incremented", part, n)))
}

/// Apply an increment to a version.
///
/// Mirrors npm's `semver.inc`:
/// - **Major**: `1.2.3` -> `2.0.0`, but `2.0.0-rc.1` -> `2.0.0`
/// - **Minor**: `1.2.3` -> `1.3.0`, but `1.3.0-rc.1` -> `1.3.0`
/// - **Patch**: `1.2.3` -> `1.2.4`, but `1.2.4-rc.1` -> `1.2.4`
/// - **Pre\***: bump the matching component, then start a pre-release
/// - **Prerelease**: increment the pre-release, or patch-bump a release first
///
/// Build metadata never survives an increment.
pub fn increment(current: &Version, kind: IncrementKind, identifier: Option<&str>) -> Result<Version> {
    let mut next = current.clone();
    next.build = BuildMetadata::EMPTY;
    let has_pre = !current.pre.is_empty();

    match kind {
        IncrementKind::Major => {
            if current.minor != 0 || current.patch != 0 || !has_pre {
                next.major = bumped(next.major, "major")?;
            }
            next.minor = 0;
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        IncrementKind::Minor => {
            if current.patch != 0 || !has_pre {
                next.minor = bumped(next.minor, "minor")?;
            }
            next.patch = 0;
            next.pre = Prerelease::EMPTY;
        }
        IncrementKind::Patch => {
            if !has_pre {
                next.patch = bumped(next.patch, "patch")?;
            }
            next.pre = Prerelease::EMPTY;
        }
        IncrementKind::Premajor => {
            next.major = bumped(next.major, "major")?;
            next.minor = 0;
            next.patch = 0;
            next.pre = PreRelease::default().bump(identifier)?.to_semver()?;
        }
        IncrementKind::Preminor => {
            next.minor = bumped(next.minor, "minor")?;
            next.patch = 0;
            next.pre = PreRelease::default().bump(identifier)?.to_semver()?;
        }
        IncrementKind::Prepatch => {
            next.patch = bumped(next.patch, "patch")?;
            next.pre = PreRelease::default().bump(identifier)?.to_semver()?;
        }
        IncrementKind::Prerelease => {
            let pre = if has_pre {
                PreRelease::from_semver(&current.pre)?
            } else {
                next.patch = bumped(next.patch, "patch")?;
                PreRelease::default()
            };
            next.pre = pre.bump(identifier)?.to_semver()?;
        }
    }

    Ok(next)
}
