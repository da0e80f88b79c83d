//! Budget settings model
//!
//! Settings that travel with a budget document: which accounts feed it, the
//! display currency and precision, where the budget starts, and which income
//! categories fund it.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

use super::income::IncomeCategory;
use super::month::MonthKey;

/// Currency for newly created budgets
pub const DEFAULT_CURRENCY: &str = "EUR";

/// Fraction digits for newly created budgets
pub const DEFAULT_FRACTION_DIGITS: u8 = 2;

/// Settings stored inside a budget document
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Selected account identifiers, in selection order
    pub accounts: Vec<String>,

    /// Currency code used for display
    pub currency: String,

    /// Income categories, in insertion order
    pub income_categories: Vec<IncomeCategory>,

    /// Number of decimal places shown for amounts
    pub fraction_digits: u8,

    /// First budgeted day, in epoch milliseconds (UTC)
    pub start_date: i64,

    /// Category ids whose rows are collapsed in the UI
    #[serde(skip_serializing_if = "BTreeSet::is_empty")]
    pub collapsed_categories: BTreeSet<String>,
}

impl Settings {
    /// Settings for a brand-new budget
    ///
    /// The budget starts at the first day of the month before `today`.
    pub fn initial(today: NaiveDate) -> Self {
        let start = MonthKey::from_date(today).prev().first_day();
        Self {
            accounts: Vec::new(),
            currency: DEFAULT_CURRENCY.to_string(),
            income_categories: Vec::new(),
            fraction_digits: DEFAULT_FRACTION_DIGITS,
            start_date: day_to_millis(start),
            collapsed_categories: BTreeSet::new(),
        }
    }

    /// The month containing `start_date`
    pub fn start_month(&self) -> Option<MonthKey> {
        MonthKey::from_millis(self.start_date)
    }

    /// Whether a category row is collapsed
    pub fn is_collapsed(&self, id: &str) -> bool {
        self.collapsed_categories.contains(id)
    }

    /// Position of the first income category matching `id`
    pub fn income_position(&self, id: Option<&str>) -> Option<usize> {
        self.income_categories.iter().position(|c| c.matches(id))
    }
}

/// Midnight UTC of `day`, in epoch milliseconds
pub fn day_to_millis(day: NaiveDate) -> i64 {
    day.and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc().timestamp_millis())
        .unwrap_or_default()
}

/// Calendar date of an epoch-milliseconds timestamp (UTC)
pub fn millis_to_day(millis: i64) -> Option<NaiveDate> {
    chrono::DateTime::from_timestamp_millis(millis).map(|dt| dt.date_naive())
}

/// Shorthand used by display code: `2024-01-01` for a start date
pub fn format_start_date(millis: i64) -> String {
    millis_to_day(millis)
        .map(|d| format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()))
        .unwrap_or_else(|| millis.to_string())
}
