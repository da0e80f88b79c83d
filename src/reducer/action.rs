//! Budget actions
//!
//! The closed set of changes that can be applied to a budget document. Actions
//! serialize as `{"type": ..., "payload": ...}` so they can be scripted.

use serde::{Deserialize, Serialize};

use crate::models::{BudgetState, CategoryId, IncomeCategory, MonthKey, NewIncomeCategory};

/// A change to a budget document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all_fields = "camelCase")]
pub enum Action {
    /// Replace the whole document (load or new budget)
    Init(BudgetState),

    /// Rename the budget
    SetName(String),

    /// Assign an amount to a category for one month
    SetCategoryValue {
        month_key: MonthKey,
        category_id: CategoryId,
        amount: f64,
    },

    /// Turn rollover on or off for a category in one month
    SetCategoryRollover {
        month_key: MonthKey,
        category_id: CategoryId,
        rollover: bool,
    },

    /// Change a document setting
    Settings(SettingsAction),
}

/// A change to the settings section of a budget document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all_fields = "camelCase")]
pub enum SettingsAction {
    SetFractionDigits(u8),
    SetSelectedAccounts(Vec<String>),
    /// Epoch milliseconds
    SetStartDate(i64),
    SetCurrency(String),
    SetIncomeCategories(Vec<IncomeCategory>),
    /// Re-point the first income category with `old_id` to `new_id`
    UpdateIncomeCategory {
        old_id: Option<String>,
        new_id: Option<String>,
    },
    SetIncomeAvailableIn {
        id: Option<String>,
        available_in: i32,
    },
    RemoveIncomeCategory(Option<String>),
    AddIncomeCategory(Option<NewIncomeCategory>),
    SetCategoryCollapsed {
        id: String,
        collapsed: bool,
    },
}

impl Action {
    /// Short name for logs and audit entries
    pub fn name(&self) -> &'static str {
        match self {
            Action::Init(_) => "Init",
            Action::SetName(_) => "SetName",
            Action::SetCategoryValue { .. } => "SetCategoryValue",
            Action::SetCategoryRollover { .. } => "SetCategoryRollover",
            Action::Settings(action) => action.name(),
        }
    }

    pub fn set_category_value(month_key: MonthKey, category_id: impl Into<String>, amount: f64) -> Self {
        Action::SetCategoryValue {
            month_key,
            category_id: category_id.into(),
            amount,
        }
    }

    pub fn set_category_rollover(
        month_key: MonthKey,
        category_id: impl Into<String>,
        rollover: bool,
    ) -> Self {
        Action::SetCategoryRollover {
            month_key,
            category_id: category_id.into(),
            rollover,
        }
    }
}

impl SettingsAction {
    pub fn name(&self) -> &'static str {
        match self {
            SettingsAction::SetFractionDigits(_) => "Settings.SetFractionDigits",
            SettingsAction::SetSelectedAccounts(_) => "Settings.SetSelectedAccounts",
            SettingsAction::SetStartDate(_) => "Settings.SetStartDate",
            SettingsAction::SetCurrency(_) => "Settings.SetCurrency",
            SettingsAction::SetIncomeCategories(_) => "Settings.SetIncomeCategories",
            SettingsAction::UpdateIncomeCategory { .. } => "Settings.UpdateIncomeCategory",
            SettingsAction::SetIncomeAvailableIn { .. } => "Settings.SetIncomeAvailableIn",
            SettingsAction::RemoveIncomeCategory(_) => "Settings.RemoveIncomeCategory",
            SettingsAction::AddIncomeCategory(_) => "Settings.AddIncomeCategory",
            SettingsAction::SetCategoryCollapsed { .. } => "Settings.SetCategoryCollapsed",
        }
    }
}

impl From<SettingsAction> for Action {
    fn from(action: SettingsAction) -> Self {
        Action::Settings(action)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_names() {
        let month: MonthKey = "2024-01".parse().unwrap();
        assert_eq!(
            Action::set_category_value(month, "food", 1.0).name(),
            "SetCategoryValue"
        );
        assert_eq!(
            Action::from(SettingsAction::RemoveIncomeCategory(None)).name(),
            "Settings.RemoveIncomeCategory"
        );
    }

    #[test]
    fn test_deserialize_scripted_actions() {
        let raw = json!([
            { "type": "SetName", "payload": "Household" },
            {
                "type": "SetCategoryValue",
                "payload": { "monthKey": "2024-01", "categoryId": "groceries", "amount": 300 }
            },
            {
                "type": "Settings",
                "payload": {
                    "type": "UpdateIncomeCategory",
                    "payload": { "oldId": null, "newId": "salary" }
                }
            },
            {
                "type": "Settings",
                "payload": { "type": "AddIncomeCategory", "payload": null }
            }
        ]);

        let actions: Vec<Action> = serde_json::from_value(raw).unwrap();
        assert_eq!(actions[0], Action::SetName("Household".into()));
        assert_eq!(
            actions[1],
            Action::set_category_value("2024-01".parse().unwrap(), "groceries", 300.0)
        );
        assert_eq!(
            actions[2],
            Action::Settings(SettingsAction::UpdateIncomeCategory {
                old_id: None,
                new_id: Some("salary".into())
            })
        );
        assert_eq!(
            actions[3],
            Action::Settings(SettingsAction::AddIncomeCategory(None))
        );
    }

    #[test]
    fn test_bad_month_key_is_rejected() {
        let raw = json!({
            "type": "SetCategoryRollover",
            "payload": { "monthKey": "2024-1", "categoryId": "rent", "rollover": true }
        });
        assert!(serde_json::from_value::<Action>(raw).is_err());
    }
}
