//! Audit entry data structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::diff::{diff_documents, summarize, Change};
use crate::models::BudgetState;

/// One dispatched action and what it changed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditEntry {
    /// When the action was applied (UTC)
    pub timestamp: DateTime<Utc>,

    /// Action name, e.g. `SetCategoryValue`
    pub action: String,

    /// Budget name at the time of the action
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,

    /// One line per changed document location
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub changes: Vec<String>,
}

impl AuditEntry {
    /// Record the transition `before` → `after` caused by `action`
    pub fn transition(action: &str, before: Option<&BudgetState>, after: &BudgetState) -> Self {
        let before_json = before
            .map(BudgetState::to_value)
            .unwrap_or(serde_json::Value::Null);
        let changes = diff_documents(&before_json, &after.to_value());

        Self {
            timestamp: Utc::now(),
            action: action.to_string(),
            budget: after.name.clone().filter(|n| !n.is_empty()),
            changes: changes.iter().map(Change::to_string).collect(),
        }
    }

    /// Whether the action left the document as it was
    pub fn is_noop(&self) -> bool {
        self.changes.is_empty()
    }

    /// Format the entry for human-readable output
    pub fn format_human_readable(&self) -> String {
        let mut output = format!(
            "[{}] {}",
            self.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            self.action
        );

        if let Some(name) = &self.budget {
            output.push_str(&format!(" ({})", name));
        }

        match summarize_lines(&self.changes) {
            Some(summary) => output.push_str(&format!("\n  Changes: {}", summary)),
            None => output.push_str("\n  No changes"),
        }

        output
    }
}

fn summarize_lines(lines: &[String]) -> Option<String> {
    if lines.is_empty() {
        None
    } else {
        Some(lines.join(", "))
    }
}

/// Diff summary between two documents, for callers that don't need an entry
pub fn describe_transition(before: &BudgetState, after: &BudgetState) -> Option<String> {
    summarize(&diff_documents(&before.to_value(), &after.to_value()))
}
