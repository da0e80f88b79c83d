//! Budget document model
//!
//! This module contains the typed budget document: the root state, per-month
//! category allocations, income categories and document settings.

pub mod category;
pub mod income;
pub mod month;
pub mod settings;
pub mod state;

pub use category::{Category, CategoryId, MonthlyBudget};
pub use income::{IncomeCategory, NewIncomeCategory};
pub use month::{MonthKey, MonthKeyParseError};
pub use settings::Settings;
pub use state::{BudgetState, Budgets, Currency, StartAmount, VERSION};
