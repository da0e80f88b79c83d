//! Validation error types
//!
//! A decode collects every problem it finds instead of stopping at the first,
//! so a rejected file can be fixed in one pass.

use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One field that did not match the schema
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Slash-separated location, rooted at `budget`
    pub path: String,
    /// What the schema wanted at `path`
    pub expected: String,
    /// Compact rendering of what was actually there
    pub found: String,
}

impl Violation {
    pub fn new(
        path: impl Into<String>,
        expected: impl Into<String>,
        found: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            expected: expected.into(),
            found: found.into(),
        }
    }

    /// Violation for a value of the wrong shape (`None` = field missing)
    pub fn mismatch(path: &str, expected: &str, found: Option<&Value>) -> Self {
        Self::new(path, expected, describe(found))
    }

    /// Violation for a field the schema does not know (strict mode only)
    pub fn unknown_field(path: &str, value: &Value) -> Self {
        Self::new(path, "no such field", describe(Some(value)))
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Invalid value {} supplied to {}, expected {}",
            self.found, self.path, self.expected
        )
    }
}

/// Render a JSON value for an error message, truncating long values
fn describe(value: Option<&Value>) -> String {
    let Some(value) = value else {
        return "undefined".to_string();
    };
    let rendered = match value {
        Value::Array(items) => format!("[{} items]", items.len()),
        Value::Object(fields) => format!("{{{} fields}}", fields.len()),
        other => other.to_string(),
    };
    if rendered.chars().count() > 50 {
        let head: String = rendered.chars().take(47).collect();
        format!("{}...", head)
    } else {
        rendered
    }
}

/// A document failed schema validation
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid budget document ({} violation(s)):\n{}", .violations.len(), render(.violations))]
pub struct ValidationError {
    violations: Vec<Violation>,
}

fn render(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(|v| format!("  - {}", v))
        .collect::<Vec<_>>()
        .join("\n")
}

impl ValidationError {
    pub fn new(violations: Vec<Violation>) -> Self {
        Self { violations }
    }

    /// Every violation, in document order
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }

    /// One message per violation
    pub fn messages(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }

    /// Whether a violation was reported at exactly this path
    pub fn has_path(&self, path: &str) -> bool {
        self.violations.iter().any(|v| v.path == path)
    }
}
