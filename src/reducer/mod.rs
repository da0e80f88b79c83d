//! Budget state transitions
//!
//! [`reduce`] is a pure function from a document and an [`Action`] to the next
//! document. It never mutates its input: each touched level is copied on write
//! through `Arc::make_mut`, and everything else is shared with the previous
//! version.
//!
//! Category edits are normalized so that the document never stores a
//! default-valued category, nor a month without categories.

pub mod action;

pub use action::{Action, SettingsAction};

use std::sync::Arc;
use tracing::{debug, warn};

use crate::error::IllegalTransition;
use crate::models::{BudgetState, Category, IncomeCategory, MonthKey, MonthlyBudget, Settings};

/// Apply an action to an optional (possibly not yet initialized) document
///
/// `Init` is accepted in either case. Any other action without a document is
/// a caller bug and yields [`IllegalTransition`].
pub fn reduce(
    state: Option<&BudgetState>,
    action: Action,
) -> Result<BudgetState, IllegalTransition> {
    match (state, action) {
        (_, Action::Init(next)) => {
            debug!(version = %next.version, "replacing budget document");
            Ok(next)
        }
        (None, action) => Err(IllegalTransition {
            action: action.name(),
        }),
        (Some(state), action) => Ok(apply(state, action)),
    }
}

/// Apply an action to an initialized document
pub fn apply(state: &BudgetState, action: Action) -> BudgetState {
    debug!(action = action.name(), "applying budget action");

    match action {
        Action::Init(next) => next,
        Action::SetName(name) => BudgetState {
            name: Some(name),
            ..state.clone()
        },
        Action::SetCategoryValue {
            month_key,
            category_id,
            amount,
        } => {
            if !amount.is_finite() {
                warn!(%month_key, %category_id, amount, "ignoring non-finite category amount");
                return state.clone();
            }
            upsert_category(state, month_key, &category_id, |category| {
                category.amount = Some(amount);
            })
        }
        Action::SetCategoryRollover {
            month_key,
            category_id,
            rollover,
        } => upsert_category(state, month_key, &category_id, |category| {
            category.rollover = Some(rollover);
        }),
        Action::Settings(action) => apply_settings(state, action),
    }
}

fn apply_settings(state: &BudgetState, action: SettingsAction) -> BudgetState {
    match action {
        SettingsAction::SetFractionDigits(digits) => {
            update_settings(state, |settings| settings.fraction_digits = digits)
        }
        SettingsAction::SetSelectedAccounts(accounts) => {
            update_settings(state, |settings| settings.accounts = accounts)
        }
        SettingsAction::SetStartDate(start_date) => {
            update_settings(state, |settings| settings.start_date = start_date)
        }
        SettingsAction::SetCurrency(currency) => {
            update_settings(state, |settings| settings.currency = currency)
        }
        SettingsAction::SetIncomeCategories(categories) => {
            update_settings(state, |settings| settings.income_categories = categories)
        }
        SettingsAction::UpdateIncomeCategory { old_id, new_id } => {
            update_income_category(state, old_id.as_deref(), |entry| {
                Some(IncomeCategory { id: new_id, ..entry })
            })
        }
        SettingsAction::SetIncomeAvailableIn { id, available_in } => {
            update_income_category(state, id.as_deref(), |entry| {
                Some(IncomeCategory {
                    available_in,
                    ..entry
                })
            })
        }
        SettingsAction::RemoveIncomeCategory(id) => {
            update_income_category(state, id.as_deref(), |_| None)
        }
        SettingsAction::AddIncomeCategory(payload) => {
            let entry = payload.unwrap_or_default().into_income_category();
            update_settings(state, |settings| settings.income_categories.push(entry))
        }
        SettingsAction::SetCategoryCollapsed { id, collapsed } => {
            update_settings(state, |settings| {
                if collapsed {
                    settings.collapsed_categories.insert(id);
                } else {
                    settings.collapsed_categories.remove(&id);
                }
            })
        }
    }
}

/// Insert or edit one category entry, then prune bottom-up
///
/// The month and category are default-constructed when missing. After
/// `update` runs, default fields are dropped, an empty category is removed
/// from its month, and an empty month is removed from `budgets`.
fn upsert_category(
    state: &BudgetState,
    month_key: MonthKey,
    category_id: &str,
    update: impl FnOnce(&mut Category),
) -> BudgetState {
    let mut next = state.clone();
    let budgets = Arc::make_mut(&mut next.budgets);

    let mut monthly = budgets
        .get(&month_key)
        .map(|m| MonthlyBudget::clone(m))
        .unwrap_or_default();
    let mut category = monthly.categories.remove(category_id).unwrap_or_default();

    update(&mut category);

    if let Some(category) = category.pruned() {
        monthly.categories.insert(category_id.to_string(), category);
    }
    if monthly.is_empty() {
        budgets.remove(&month_key);
    } else {
        budgets.insert(month_key, Arc::new(monthly));
    }

    next
}

fn update_settings(state: &BudgetState, update: impl FnOnce(&mut Settings)) -> BudgetState {
    let mut next = state.clone();
    update(Arc::make_mut(&mut next.settings));
    next
}

/// Replace (or, when `update` returns `None`, remove) the first income
/// category whose id equals `id`
///
/// A missing id leaves the document untouched; the UI may still reference an
/// entry that a previous action removed.
fn update_income_category(
    state: &BudgetState,
    id: Option<&str>,
    update: impl FnOnce(IncomeCategory) -> Option<IncomeCategory>,
) -> BudgetState {
    let Some(index) = state.settings.income_position(id) else {
        debug!(?id, "income category not found, leaving budget unchanged");
        return state.clone();
    };

    update_settings(state, |settings| {
        let entry = settings.income_categories.remove(index);
        if let Some(replacement) = update(entry) {
            settings.income_categories.insert(index, replacement);
        }
    })
}
