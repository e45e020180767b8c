//! Pre-release component handling for semantic versioning
//!
//! A pre-release is a dot-separated list of identifiers, each either numeric
//! or alphanumeric (https://semver.org/#spec-item-9). Incrementing follows the
//! rules npm tooling applies, so versions produced here match what a JavaScript
//! package ecosystem expects:
//!
//! - `""` -> `0` (or `<id>.0` when an identifier is requested)
//! - `beta.1` -> `beta.2`
//! - `beta` -> `beta.0`
//! - `beta.1` with identifier `rc` -> `rc.0`

use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// A single pre-release identifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identifier {
    Numeric(u64),
    AlphaNumeric(String),
}

impl FromStr for Identifier {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Err(ReleaseError::version("Empty pre-release identifier"));
        }

        if s.chars().all(|c| c.is_ascii_digit()) {
            return s.parse::<u64>().map(Identifier::Numeric).map_err(|_| {
                ReleaseError::version(format!("Pre-release number out of range: '{}'", s))
            });
        }

        if s.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            Ok(Identifier::AlphaNumeric(s.to_string()))
        } else {
            Err(ReleaseError::version(format!(
                "Invalid pre-release identifier: '{}'",
                s
            )))
        }
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Numeric(n) => write!(f, "{}", n),
            Identifier::AlphaNumeric(s) => write!(f, "{}", s),
        }
    }
}

/// Pre-release part of a version, e.g. `beta.1` or `rc.0.3`
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreRelease {
    pub identifiers: Vec<Identifier>,
}

impl PreRelease {
    /// Parse a pre-release from its dotted string form. An empty string is an
    /// empty pre-release.
    pub fn parse(s: &str) -> Result<Self> {
        if s.is_empty() {
            return Ok(PreRelease::default());
        }

        let identifiers = s
            .split('.')
            .map(Identifier::from_str)
            .collect::<Result<Vec<_>>>()?;

        Ok(PreRelease { identifiers })
    }

    pub fn from_semver(pre: &semver::Prerelease) -> Result<Self> {
        Self::parse(pre.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.identifiers.is_empty()
    }

    /// Increment the pre-release.
    ///
    /// The last numeric identifier is incremented (a `0` is appended when there
    /// is none). When `identifier` is given and differs from the current leading
    /// identifier, the pre-release restarts at `<identifier>.0`.
    pub fn bump(&self, identifier: Option<&str>) -> Result<Self> {
        let mut identifiers = self.identifiers.clone();

        if identifiers.is_empty() {
            identifiers.push(Identifier::Numeric(0));
        } else {
            let last_numeric = identifiers
                .iter()
                .rposition(|id| matches!(id, Identifier::Numeric(_)));
            match last_numeric {
                Some(pos) => {
                    if let Identifier::Numeric(n) = &mut identifiers[pos] {
                        let current = *n;
                        *n = current.checked_add(1).ok_or_else(|| {
                            ReleaseError::version(format!(
                                "Pre-release number {} cannot be incremented",
                                current
                            ))
                        })?;
                    }
                }
                None => identifiers.push(Identifier::Numeric(0)),
            }
        }

        if let Some(raw) = identifier {
            let requested = Identifier::from_str(raw)?;
            let restart = if identifiers.first() == Some(&requested) {
                !matches!(identifiers.get(1), Some(Identifier::Numeric(_)))
            } else {
                true
            };
            if restart {
                identifiers = vec![requested, Identifier::Numeric(0)];
            }
        }

        Ok(PreRelease { identifiers })
    }

    pub fn to_semver(&self) -> Result<semver::Prerelease> {
        semver::Prerelease::new(&self.to_string())
            .map_err(|e| ReleaseError::version(format!("Invalid pre-release '{}': {}", self, e)))
    }
}

impl fmt::Display for PreRelease {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, id) in self.identifiers.iter().enumerate() {
            if i > 0 {
                write!(f, ".")?;
            }
            write!(f, "{}", id)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bumped(pre: &str, identifier: Option<&str>) -> String {
        PreRelease::parse(pre)
            .unwrap()
            .bump(identifier)
            .unwrap()
            .to_string()
    }

    #[test]
    fn test_identifier_parse_numeric() {
        assert_eq!(Identifier::from_str("3").unwrap(), Identifier::Numeric(3));
    }

    #[test]
    fn test_identifier_parse_alphanumeric() {
        assert_eq!(
            Identifier::from_str("beta-2").unwrap(),
            Identifier::AlphaNumeric("beta-2".to_string())
        );
    }

    #[test]
    fn test_identifier_parse_invalid() {
        assert!(Identifier::from_str("").is_err());
        assert!(Identifier::from_str("be ta").is_err());
        assert!(Identifier::from_str("beta!").is_err());
    }

    #[test]
    fn test_parse_empty_is_empty() {
        assert!(PreRelease::parse("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_and_display() {
        let pr = PreRelease::parse("rc.0.3").unwrap();
        assert_eq!(pr.identifiers.len(), 3);
        assert_eq!(pr.to_string(), "rc.0.3");
    }

    #[test]
    fn test_bump_empty_without_identifier() {
        assert_eq!(bumped("", None), "0");
    }

    #[test]
    fn test_bump_empty_with_identifier() {
        assert_eq!(bumped("", Some("beta")), "beta.0");
    }

    #[test]
    fn test_bump_increments_last_numeric() {
        assert_eq!(bumped("beta.1", None), "beta.2");
        assert_eq!(bumped("beta.1.alpha", None), "beta.2.alpha");
    }

    #[test]
    fn test_bump_appends_zero_without_numeric() {
        assert_eq!(bumped("beta", None), "beta.0");
    }

    #[test]
    fn test_bump_same_identifier_keeps_counting() {
        assert_eq!(bumped("beta.4", Some("beta")), "beta.5");
    }

    #[test]
    fn test_bump_other_identifier_restarts() {
        assert_eq!(bumped("beta.4", Some("rc")), "rc.0");
    }

    #[test]
    fn test_bump_same_identifier_without_counter_restarts() {
        assert_eq!(bumped("beta.alpha", Some("beta")), "beta.0");
    }

    #[test]
    fn test_bump_overflow_is_invalid_version() {
        let pre = PreRelease::parse("18446744073709551615").unwrap();
        let err = pre.bump(None).unwrap_err();
        assert!(matches!(err, ReleaseError::InvalidVersion(_)));
    }

    #[test]
    fn test_bump_rejects_invalid_identifier() {
        assert!(PreRelease::parse("").unwrap().bump(Some("no good")).is_err());
    }

    #[test]
    fn test_to_semver() {
        let pre = PreRelease::parse("beta.2").unwrap().to_semver().unwrap();
        assert_eq!(pre.as_str(), "beta.2");
    }
}
