//! Layering of a user configuration document over the defaults.
//!
//! Tables merge key by key. Every other value supplied by the user replaces
//! the default outright, arrays included, with one exception: the
//! `next_possible` option list is merged per `type`, so a user can restyle or
//! disable a single candidate without restating the whole list.
//!
//! The merge never touches its inputs; it builds a new document.

use toml::{Table, Value};

/// Key of the next-version option list inside `[bump]`
pub const NEXT_POSSIBLE: &str = "next_possible";

/// Position assumed for an option that does not declare one. Equal positions
/// keep the order of this table.
pub const DEFAULT_POSITIONS: [(&str, i64); 9] = [
    ("prerelease", 10),
    ("patch", 11),
    ("prepatch", 12),
    ("minor", 13),
    ("preminor", 14),
    ("premajor", 14),
    ("major", 15),
    ("separator", 16),
    ("custom", 16),
];

pub fn default_position(kind: &str) -> Option<i64> {
    DEFAULT_POSITIONS
        .iter()
        .find(|(name, _)| *name == kind)
        .map(|(_, pos)| *pos)
}

fn tie_rank(kind: Option<&str>) -> usize {
    kind.and_then(|k| DEFAULT_POSITIONS.iter().position(|(name, _)| *name == k))
        .unwrap_or(DEFAULT_POSITIONS.len())
}

/// Merge `user` over `default`, returning a new document.
pub fn merge(default: &Value, user: &Value) -> Value {
    match (default, user) {
        (Value::Table(d), Value::Table(u)) => Value::Table(merge_tables(d, u)),
        (_, u) => u.clone(),
    }
}

fn merge_tables(default: &Table, user: &Table) -> Table {
    let mut merged = default.clone();

    for (key, user_value) in user {
        let value = match (key.as_str(), default.get(key), user_value) {
            (NEXT_POSSIBLE, Some(Value::Array(d)), Value::Array(u)) => {
                Value::Array(merge_next_possible(d, u))
            }
            (NEXT_POSSIBLE, None, Value::Array(u)) => Value::Array(merge_next_possible(&[], u)),
            (_, Some(d), u) => merge(d, u),
            (_, None, u) => u.clone(),
        };
        merged.insert(key.clone(), value);
    }

    if !user.contains_key(NEXT_POSSIBLE) {
        if let Some(Value::Array(entries)) = default.get(NEXT_POSSIBLE) {
            merged.insert(
                NEXT_POSSIBLE.to_string(),
                Value::Array(merge_next_possible(entries, &[])),
            );
        }
    }

    merged
}

fn entry_type(entry: &Value) -> Option<&str> {
    entry.get("type").and_then(Value::as_str)
}

fn entry_position(entry: &Value) -> Option<i64> {
    entry.get("position").and_then(Value::as_integer)
}

/// Fill in the table position when the entry has a known type and no position.
fn with_position(entry: &Value) -> Value {
    let mut entry = entry.clone();
    if let Value::Table(table) = &mut entry {
        if !table.contains_key("position") {
            let position = table
                .get("type")
                .and_then(Value::as_str)
                .and_then(default_position);
            if let Some(position) = position {
                table.insert("position".to_string(), Value::Integer(position));
            }
        }
    }
    entry
}

fn merge_next_possible(default: &[Value], user: &[Value]) -> Vec<Value> {
    let mut entries: Vec<Value> = Vec::with_capacity(default.len() + user.len());

    for entry in default.iter().chain(user).map(with_position) {
        let slot = match entry_type(&entry) {
            Some(kind) => entries.iter().position(|e| entry_type(e) == Some(kind)),
            None => entries.iter().position(|e| *e == entry),
        };
        match slot {
            Some(i) => entries[i] = entry,
            None => entries.push(entry),
        }
    }

    entries.sort_by_key(|e| (entry_position(e).unwrap_or(i64::MAX), tie_rank(entry_type(e))));
    entries
}
