//! Document diffs for audit entries
//!
//! Compares two serialized budget documents and lists changed leaves by
//! dotted path, e.g. `budgets.2024-01.categories.food.amount`.

use serde_json::Value;
use std::fmt;

/// One changed location between two documents
#[derive(Debug, Clone, PartialEq)]
pub struct Change {
    pub path: String,
    /// `None` when the location was added
    pub before: Option<Value>,
    /// `None` when the location was removed
    pub after: Option<Value>,
}

impl fmt::Display for Change {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side = |v: &Option<Value>, missing: &str| {
            v.as_ref()
                .map(format_value)
                .unwrap_or_else(|| missing.to_string())
        };
        write!(
            f,
            "{}: {} -> {}",
            self.path,
            side(&self.before, "(added)"),
            side(&self.after, "(removed)")
        )
    }
}

/// List every changed leaf between two documents
///
/// Objects are compared key by key and recursed into. Arrays and scalars are
/// compared as a whole, so a reordered account list is a single change.
pub fn diff_documents(before: &Value, after: &Value) -> Vec<Change> {
    let mut changes = Vec::new();
    walk(before, after, "", &mut changes);
    changes
}

/// One-line summary of a diff, `None` when nothing changed
pub fn summarize(changes: &[Change]) -> Option<String> {
    if changes.is_empty() {
        return None;
    }
    Some(
        changes
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", "),
    )
}

fn walk(before: &Value, after: &Value, prefix: &str, changes: &mut Vec<Change>) {
    if before == after {
        return;
    }

    match (before, after) {
        (Value::Object(old), Value::Object(new)) => {
            for (key, old_value) in old {
                let path = child_path(prefix, key);
                match new.get(key) {
                    Some(new_value) => walk(old_value, new_value, &path, changes),
                    None => changes.push(Change {
                        path,
                        before: Some(old_value.clone()),
                        after: None,
                    }),
                }
            }
            for (key, new_value) in new {
                if !old.contains_key(key) {
                    changes.push(Change {
                        path: child_path(prefix, key),
                        before: None,
                        after: Some(new_value.clone()),
                    });
                }
            }
        }
        _ => changes.push(Change {
            path: if prefix.is_empty() {
                "(root)".to_string()
            } else {
                prefix.to_string()
            },
            before: Some(before.clone()),
            after: Some(after.clone()),
        }),
    }
}

fn child_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{}.{}", prefix, key)
    }
}

/// Compact rendering of a value for a change line
fn format_value(value: &Value) -> String {
    match value {
        Value::String(s) if s.chars().count() > 40 => {
            let head: String = s.chars().take(37).collect();
            format!("\"{}...\"", head)
        }
        Value::Array(items) if items.len() > 5 => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    }
}
