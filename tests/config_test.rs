// tests/config_test.rs
use bump_and_release::config::{load_config, OptionKind, CONFIG_FILE_NAME};
use bump_and_release::domain::IncrementKind;
use bump_and_release::ReleaseError;
use std::fs;
use std::io::Write;
use tempfile::{NamedTempFile, TempDir};

#[test]
fn test_load_from_explicit_file() {
    let dir = TempDir::new().unwrap();
    let mut temp_file = NamedTempFile::new().unwrap();
    let toml_content = r#"
allowed_branches = ["main", "next"]

[release]
commit_message = "release {version}"

[release.tag]
enabled = false
"#;
    temp_file.write_all(toml_content.as_bytes()).unwrap();
    temp_file.flush().unwrap();

    let config = load_config(Some(temp_file.path()), dir.path()).unwrap();
    assert_eq!(config.allowed_branches, vec!["main", "next"]);
    assert_eq!(config.release.commit_message.as_str(), "release {version}");
    assert!(!config.release.tag.enabled);
    assert_eq!(config.release.tag.prefix, "v");
    assert_eq!(
        config.bump.commit_message.as_str(),
        "chore: bumping version for next release: {version}"
    );
}

#[test]
fn test_load_from_project_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"
[bump]
lerna_mode = true

[[bump.next_possible]]
type = "preminor"
identifier = "alpha"
position = 0
default = true
"#,
    )
    .unwrap();

    let config = load_config(None, dir.path()).unwrap();
    assert!(config.bump.lerna_mode);
    let first = &config.bump.next_possible[0];
    assert_eq!(first.kind, OptionKind::Increment(IncrementKind::Preminor));
    assert_eq!(first.identifier.as_deref(), Some("alpha"));
    assert!(first.default);
    assert_eq!(config.bump.next_possible.len(), 5);
}

#[test]
fn test_missing_explicit_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    let err = load_config(Some(&dir.path().join("nope.toml")), dir.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_malformed_file_is_config_error() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join(CONFIG_FILE_NAME), "allowed_branches = [").unwrap();
    let err = load_config(None, dir.path()).unwrap_err();
    assert!(matches!(err, ReleaseError::Config(_)));
}

#[test]
fn test_next_possible_positions_are_ordered() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join(CONFIG_FILE_NAME),
        r#"
[[bump.next_possible]]
type = "prerelease"

[[bump.next_possible]]
type = "premajor"

[[bump.next_possible]]
type = "major"
position = 1
"#,
    )
    .unwrap();

    let config = load_config(None, dir.path()).unwrap();
    let kinds: Vec<&str> = config
        .bump
        .next_possible
        .iter()
        .map(|o| o.kind.as_str())
        .collect();
    assert_eq!(
        kinds,
        vec!["major", "prerelease", "patch", "minor", "premajor", "custom"]
    );
    let positions: Vec<i64> = config
        .bump
        .next_possible
        .iter()
        .map(|o| o.position.unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] <= w[1]));
}
