//! Income category model
//!
//! An income category marks an account category whose inflows fund the
//! budget, and how many months after receipt that money becomes available.

use serde::{Deserialize, Serialize};

use super::month::MonthKey;

/// An income source entry in the settings
///
/// `id` is `None` while the user is still picking the category; such entries
/// are kept in the list but ignored by income queries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeCategory {
    pub id: Option<String>,
    /// Month offset between receipt and availability (0 = same month)
    pub available_in: i32,
}

impl IncomeCategory {
    /// Create an income category with a known id
    pub fn new(id: impl Into<String>, available_in: i32) -> Self {
        Self {
            id: Some(id.into()),
            available_in,
        }
    }

    /// Placeholder entry with no id, available the same month
    pub fn unassigned() -> Self {
        Self {
            id: None,
            available_in: 0,
        }
    }

    /// Whether an id has been chosen
    pub fn is_assigned(&self) -> bool {
        self.id.is_some()
    }

    /// Whether this entry matches a lookup key (`None` matches `None`)
    pub fn matches(&self, id: Option<&str>) -> bool {
        self.id.as_deref() == id
    }

    /// The month in which income received in `received` can be budgeted
    pub fn available_month(&self, received: MonthKey) -> MonthKey {
        received.offset(self.available_in)
    }
}

/// Optional payload for appending an income category
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewIncomeCategory {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub available_in: Option<i32>,
}

impl NewIncomeCategory {
    /// Build the entry to append, filling absent fields with defaults
    pub fn into_income_category(self) -> IncomeCategory {
        IncomeCategory {
            id: self.id,
            available_in: self.available_in.unwrap_or(0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_none_key() {
        let pending = IncomeCategory::unassigned();
        assert!(pending.matches(None));
        assert!(!pending.matches(Some("salary")));

        let salary = IncomeCategory::new("salary", 1);
        assert!(salary.matches(Some("salary")));
        assert!(!salary.matches(None));
    }

    #[test]
    fn test_available_month() {
        let salary = IncomeCategory::new("salary", 1);
        let received: MonthKey = "2024-12".parse().unwrap();
        assert_eq!(salary.available_month(received).to_string(), "2025-01");

        let same_month = IncomeCategory::new("side", 0);
        assert_eq!(same_month.available_month(received), received);
    }

    #[test]
    fn test_new_income_defaults() {
        let entry = NewIncomeCategory::default().into_income_category();
        assert_eq!(entry, IncomeCategory::unassigned());

        let entry = NewIncomeCategory {
            id: Some("salary".into()),
            available_in: None,
        }
        .into_income_category();
        assert_eq!(entry, IncomeCategory::new("salary", 0));
    }

    #[test]
    fn test_serialization_keeps_null_id() {
        let json = serde_json::to_string(&IncomeCategory::unassigned()).unwrap();
        assert_eq!(json, r#"{"id":null,"availableIn":0}"#);
    }
}
