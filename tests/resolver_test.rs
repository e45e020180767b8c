// tests/resolver_test.rs
use bump_and_release::config::Config;
use bump_and_release::resolver::{resolve, ChoiceValue};

#[test]
fn test_default_major_choice() {
    let config = Config::from_toml_str(
        r#"
[[bump.next_possible]]
type = "major"
default = true
"#,
    )
    .unwrap();

    let choices = resolve("1.0.1", &config).unwrap();
    let values: Vec<String> = choices
        .selectable()
        .iter()
        .map(|s| match &s.value {
            ChoiceValue::Version(v) => v.to_string(),
            ChoiceValue::Custom => "custom".to_string(),
        })
        .collect();

    assert_eq!(values, vec!["1.0.2", "1.1.0", "2.0.0", "custom"]);
    assert_eq!(choices.default_index, 2);
}

#[test]
fn test_default_index_points_at_selectable() {
    let config = Config::from_toml_str(
        r#"
[[bump.next_possible]]
type = "separator"
position = 0

[[bump.next_possible]]
type = "patch"
enabled = false
default = true
"#,
    )
    .unwrap();

    let choices = resolve("0.9.0", &config).unwrap();
    assert_eq!(choices.default_index, 0);
    assert!(choices.get(choices.default_index).is_some());
    assert_eq!(choices.get(0).unwrap().short, "0.10.0");
}
