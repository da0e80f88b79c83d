//! Category allocation model
//!
//! A category entry records what was assigned to a spending category in one
//! month, and whether its balance rolls over. Both fields are optional and
//! default-valued fields are never stored.

use serde::Serialize;
use std::collections::BTreeMap;

/// Identifier of a spending category (owned by the external account source)
pub type CategoryId = String;

/// Per-month entry for one spending category
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Amount assigned this month; `Some(0.0)` never survives pruning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    /// Whether the balance carries into the next month; `Some(false)` never
    /// survives pruning
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rollover: Option<bool>,
}

impl Category {
    /// Create a category with an assigned amount
    pub fn with_amount(amount: f64) -> Self {
        Self {
            amount: Some(amount),
            rollover: None,
        }
    }

    /// Assigned amount, treating absence as zero
    pub fn amount(&self) -> f64 {
        self.amount.unwrap_or(0.0)
    }

    /// Whether rollover is enabled, treating absence as off
    pub fn rolls_over(&self) -> bool {
        self.rollover.unwrap_or(false)
    }

    /// True when no field is present
    pub fn is_empty(&self) -> bool {
        self.amount.is_none() && self.rollover.is_none()
    }

    /// Drop default-valued fields; returns `None` when nothing remains
    ///
    /// Amount is checked before rollover, then emptiness.
    pub fn pruned(mut self) -> Option<Self> {
        if self.amount == Some(0.0) {
            self.amount = None;
        }
        if self.rollover == Some(false) {
            self.rollover = None;
        }
        if self.is_empty() {
            None
        } else {
            Some(self)
        }
    }
}

/// All category entries for one month
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MonthlyBudget {
    pub categories: BTreeMap<CategoryId, Category>,
}

impl MonthlyBudget {
    /// Look up a category entry
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.get(id)
    }

    /// True when the month holds no category entries
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Sum of assigned amounts across categories
    pub fn total_assigned(&self) -> f64 {
        self.categories.values().map(Category::amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pruned_drops_zero_amount() {
        let category = Category {
            amount: Some(0.0),
            rollover: Some(true),
        };
        assert_eq!(
            category.pruned(),
            Some(Category {
                amount: None,
                rollover: Some(true)
            })
        );
    }

    #[test]
    fn test_pruned_drops_false_rollover() {
        let category = Category {
            amount: Some(12.5),
            rollover: Some(false),
        };
        assert_eq!(category.pruned(), Some(Category::with_amount(12.5)));
    }

    #[test]
    fn test_pruned_empty_is_none() {
        let category = Category {
            amount: Some(0.0),
            rollover: Some(false),
        };
        assert_eq!(category.pruned(), None);
        assert_eq!(Category::default().pruned(), None);
    }

    #[test]
    fn test_negative_zero_is_pruned() {
        assert_eq!(Category::with_amount(-0.0).pruned(), None);
    }

    #[test]
    fn test_serialization_omits_absent_fields() {
        let json = serde_json::to_string(&Category::with_amount(300.0)).unwrap();
        assert_eq!(json, r#"{"amount":300.0}"#);

        let json = serde_json::to_string(&Category {
            amount: None,
            rollover: Some(true),
        })
        .unwrap();
        assert_eq!(json, r#"{"rollover":true}"#);
    }

    #[test]
    fn test_total_assigned() {
        let mut month = MonthlyBudget::default();
        month
            .categories
            .insert("rent".into(), Category::with_amount(900.0));
        month.categories.insert(
            "fun".into(),
            Category {
                amount: None,
                rollover: Some(true),
            },
        );
        month
            .categories
            .insert("food".into(), Category::with_amount(250.5));
        assert_eq!(month.total_assigned(), 1150.5);
    }
}
