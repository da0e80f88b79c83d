//! The budget document
//!
//! `BudgetState` is the root of everything persisted for one budget. Nested
//! values sit behind `Arc` so a new version can share every part it did not
//! touch with the version it was derived from.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use super::category::{Category, MonthlyBudget};
use super::income::IncomeCategory;
use super::month::MonthKey;
use super::settings::Settings;

/// Schema version written into new documents
pub const VERSION: &str = "0.0.1";

/// Sparse month → allocations map
pub type Budgets = BTreeMap<MonthKey, Arc<MonthlyBudget>>;

/// Currency of an opening balance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "EUR")]
    Eur,
    #[serde(rename = "USD")]
    Usd,
}

impl Currency {
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Eur => "EUR",
            Currency::Usd => "USD",
        }
    }

    /// Parse an ISO code, as stored in documents
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "EUR" => Some(Currency::Eur),
            "USD" => Some(Currency::Usd),
            _ => None,
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Opening balance in one currency, serialized as `[amount, "EUR"]`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StartAmount(pub f64, pub Currency);

/// Root budget document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    pub version: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_amount: Option<Vec<StartAmount>>,

    pub budgets: Arc<Budgets>,

    pub settings: Arc<Settings>,
}

impl BudgetState {
    /// Empty document for a brand-new budget created on `today`
    pub fn initial(today: NaiveDate) -> Self {
        Self {
            name: Some(String::new()),
            version: VERSION.to_string(),
            start_amount: None,
            budgets: Arc::new(Budgets::new()),
            settings: Arc::new(Settings::initial(today)),
        }
    }

    /// Display name, empty when unnamed
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    /// Allocations for a month, if that month has any
    pub fn month(&self, key: &MonthKey) -> Option<&MonthlyBudget> {
        self.budgets.get(key).map(Arc::as_ref)
    }

    /// A single category entry
    pub fn category(&self, key: &MonthKey, category_id: &str) -> Option<&Category> {
        self.month(key).and_then(|m| m.category(category_id))
    }

    /// Whether any non-default value was ever stored for this month
    pub fn is_touched(&self, key: &MonthKey) -> bool {
        self.budgets.contains_key(key)
    }

    /// Earliest month with allocations
    pub fn first_month(&self) -> Option<MonthKey> {
        self.budgets.keys().next().copied()
    }

    /// Latest month with allocations
    pub fn last_month(&self) -> Option<MonthKey> {
        self.budgets.keys().next_back().copied()
    }

    /// Sum of assigned amounts in a month (zero for untouched months)
    pub fn total_assigned(&self, key: &MonthKey) -> f64 {
        self.month(key).map_or(0.0, MonthlyBudget::total_assigned)
    }

    /// Income categories that have an id, in list order
    pub fn assigned_income_categories(&self) -> impl Iterator<Item = &IncomeCategory> {
        self.settings
            .income_categories
            .iter()
            .filter(|c| c.is_assigned())
    }

    /// Serialize as a JSON value
    pub fn to_value(&self) -> serde_json::Value {
        // Every field serializes to plain JSON, so this cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

impl<'de> Deserialize<'de> for BudgetState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = serde_json::Value::deserialize(deserializer)?;
        crate::schema::decode(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 20).unwrap()
    }

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    fn sample() -> BudgetState {
        let mut state = BudgetState::initial(today());
        let mut budgets = Budgets::new();
        let mut jan = MonthlyBudget::default();
        jan.categories
            .insert("groceries".into(), Category::with_amount(300.0));
        jan.categories
            .insert("rent".into(), Category::with_amount(900.0));
        budgets.insert(key("2024-01"), Arc::new(jan));
        let mut mar = MonthlyBudget::default();
        mar.categories.insert(
            "rent".into(),
            Category {
                amount: None,
                rollover: Some(true),
            },
        );
        budgets.insert(key("2024-03"), Arc::new(mar));
        state.budgets = Arc::new(budgets);
        state
    }

    #[test]
    fn test_initial_state() {
        let state = BudgetState::initial(today());
        assert_eq!(state.version, VERSION);
        assert_eq!(state.display_name(), "");
        assert!(state.budgets.is_empty());
        assert!(state.settings.accounts.is_empty());
        assert_eq!(state.first_month(), None);
    }

    #[test]
    fn test_month_queries() {
        let state = sample();
        assert_eq!(state.first_month(), Some(key("2024-01")));
        assert_eq!(state.last_month(), Some(key("2024-03")));
        assert!(state.is_touched(&key("2024-01")));
        assert!(!state.is_touched(&key("2024-02")));
        assert_eq!(state.total_assigned(&key("2024-01")), 1200.0);
        assert_eq!(state.total_assigned(&key("2024-02")), 0.0);
        assert!(state.category(&key("2024-03"), "rent").unwrap().rolls_over());
    }

    #[test]
    fn test_assigned_income_categories_skip_pending() {
        let mut state = sample();
        Arc::make_mut(&mut state.settings).income_categories = vec![
            IncomeCategory::unassigned(),
            IncomeCategory::new("salary", 1),
        ];
        let ids: Vec<_> = state
            .assigned_income_categories()
            .filter_map(|c| c.id.as_deref())
            .collect();
        assert_eq!(ids, vec!["salary"]);
    }

    #[test]
    fn test_serialized_shape() {
        let mut state = sample();
        state.start_amount = Some(vec![StartAmount(100.0, Currency::Usd)]);
        let json = state.to_value();

        assert_eq!(json["version"], "0.0.1");
        assert_eq!(json["startAmount"], serde_json::json!([[100.0, "USD"]]));
        assert_eq!(
            json["budgets"]["2024-01"]["categories"]["groceries"]["amount"],
            300.0
        );
        assert_eq!(
            json["budgets"]["2024-03"]["categories"]["rent"],
            serde_json::json!({ "rollover": true })
        );
    }

    #[test]
    fn test_absent_optionals_are_not_null() {
        let mut state = BudgetState::initial(today());
        state.name = None;
        let json = state.to_value();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("name"));
        assert!(!object.contains_key("startAmount"));
    }

    #[test]
    fn test_serde_round_trip() {
        let state = sample();
        let json = serde_json::to_string(&state).unwrap();
        let decoded: BudgetState = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, state);
    }
}
