//! Error types for moneybudget
//!
//! Recoverable failures (bad files, bad input, I/O) are `BudgetError`.
//! Schema problems carry the full `ValidationError` so callers can show every
//! violation. Dispatch-order bugs are `IllegalTransition` and are not folded
//! into `BudgetError`, since they are not meant to be handled.

use thiserror::Error;

use crate::schema::ValidationError;

/// The main error type for moneybudget operations
#[derive(Error, Debug)]
pub enum BudgetError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// The document does not match the budget schema
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// User input that could not be parsed (month keys, amounts, flags)
    #[error("Parse error: {0}")]
    Parse(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),
}

impl BudgetError {
    /// Create a "not found" error for budget files
    pub fn budget_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Budget",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for income categories
    pub fn income_category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Income category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

impl From<std::io::Error> for BudgetError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for BudgetError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for moneybudget operations
pub type BudgetResult<T> = Result<T, BudgetError>;

/// A non-`Init` action reached a store that was never initialized.
///
/// This is a sequencing bug in the caller (dispatch before load/create).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unexpected action {action} on uninitialized state")]
pub struct IllegalTransition {
    /// Name of the offending action
    pub action: &'static str,
}
