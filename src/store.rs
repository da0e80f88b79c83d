//! Budget store
//!
//! Holds the current document and is the single dispatch point for actions.
//! Previous snapshots are kept for undo; since snapshots share structure,
//! keeping them is cheap.

use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::audit::{AuditEntry, AuditLogger};
use crate::error::IllegalTransition;
use crate::models::BudgetState;
use crate::reducer::{reduce, Action};

/// Number of undo steps kept when no limit is configured
pub const DEFAULT_HISTORY_LIMIT: usize = 100;

/// Current budget document plus undo/redo history
#[derive(Debug)]
pub struct Store {
    state: Option<BudgetState>,
    unsaved: bool,
    undo: VecDeque<BudgetState>,
    redo: Vec<BudgetState>,
    history_limit: usize,
    audit: Option<AuditLogger>,
}

impl Default for Store {
    fn default() -> Self {
        Self::new()
    }
}

impl Store {
    /// An uninitialized store; only `Init` may be dispatched first
    pub fn new() -> Self {
        Self {
            state: None,
            unsaved: false,
            undo: VecDeque::new(),
            redo: Vec::new(),
            history_limit: DEFAULT_HISTORY_LIMIT,
            audit: None,
        }
    }

    /// A store holding a document that was just loaded
    pub fn loaded(state: BudgetState) -> Self {
        let mut store = Self::new();
        store.dispatch(Action::Init(state));
        store
    }

    /// A store holding a brand-new, not yet saved budget
    pub fn create(today: NaiveDate) -> Self {
        let mut store = Self::loaded(BudgetState::initial(today));
        store.unsaved = true;
        store
    }

    /// Keep at most `limit` undo steps (0 disables history)
    pub fn with_history_limit(mut self, limit: usize) -> Self {
        self.history_limit = limit;
        self.undo.truncate(limit);
        self
    }

    /// Record every subsequent dispatch in an audit log
    pub fn with_audit(mut self, logger: AuditLogger) -> Self {
        self.audit = Some(logger);
        self
    }

    /// The current document, `None` before the first `Init`
    pub fn state(&self) -> Option<&BudgetState> {
        self.state.as_ref()
    }

    /// Whether the document changed since it was loaded or last saved
    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Call after the current document has been persisted
    pub fn mark_saved(&mut self) {
        self.unsaved = false;
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Apply an action
    ///
    /// # Panics
    ///
    /// Panics if a non-`Init` action is dispatched before any `Init`. That is
    /// a sequencing bug in the caller, not a runtime condition.
    pub fn dispatch(&mut self, action: Action) -> &BudgetState {
        match self.try_dispatch(action) {
            Ok(state) => state,
            Err(fault) => panic!("{}", fault),
        }
    }

    /// Apply an action, returning the fault instead of panicking
    pub fn try_dispatch(&mut self, action: Action) -> Result<&BudgetState, IllegalTransition> {
        let name = action.name();
        let is_init = matches!(action, Action::Init(_));
        let next = reduce(self.state.as_ref(), action)?;

        if let Some(logger) = &self.audit {
            let entry = AuditEntry::transition(name, self.state.as_ref(), &next);
            if let Err(e) = logger.log(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }

        if is_init {
            info!(budget = next.display_name(), "budget initialized");
            self.undo.clear();
            self.redo.clear();
            self.unsaved = false;
            return Ok(self.state.insert(next));
        }

        match self.state.take() {
            Some(previous) if same_snapshot(&previous, &next) => {
                debug!(action = name, "action left budget unchanged");
                Ok(self.state.insert(previous))
            }
            previous => {
                if let Some(previous) = previous {
                    self.push_undo(previous);
                }
                self.redo.clear();
                self.unsaved = true;
                Ok(self.state.insert(next))
            }
        }
    }

    /// Step back to the previous document; returns false if there is none
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.undo.pop_front() else {
            return false;
        };
        if let Some(current) = self.state.replace(previous) {
            self.redo.push(current);
        }
        self.unsaved = true;
        debug!(remaining = self.undo.len(), "undo");
        true
    }

    /// Re-apply the most recently undone change; returns false if there is none
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.redo.pop() else {
            return false;
        };
        if let Some(current) = self.state.replace(next) {
            self.push_undo(current);
        }
        self.unsaved = true;
        debug!(remaining = self.redo.len(), "redo");
        true
    }

    fn push_undo(&mut self, snapshot: BudgetState) {
        if self.history_limit == 0 {
            return;
        }
        self.undo.push_front(snapshot);
        self.undo.truncate(self.history_limit);
    }
}

/// Cheap equality: shared substructure compares by pointer first
fn same_snapshot(a: &BudgetState, b: &BudgetState) -> bool {
    a.name == b.name
        && a.version == b.version
        && a.start_amount == b.start_amount
        && (Arc::ptr_eq(&a.budgets, &b.budgets) || a.budgets == b.budgets)
        && (Arc::ptr_eq(&a.settings, &b.settings) || a.settings == b.settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MonthKey;
    use crate::reducer::SettingsAction;
    use tempfile::TempDir;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
    }

    fn key(s: &str) -> MonthKey {
        s.parse().unwrap()
    }

    #[test]
    fn test_new_store_is_uninitialized() {
        let store = Store::new();
        assert!(store.state().is_none());
        assert!(!store.is_unsaved());
    }

    #[test]
    #[should_panic(expected = "Unexpected action SetName on uninitialized state")]
    fn test_dispatch_before_init_panics() {
        let mut store = Store::new();
        store.dispatch(Action::SetName("x".into()));
    }

    #[test]
    fn test_try_dispatch_before_init_errors() {
        let mut store = Store::new();
        let err = store
            .try_dispatch(Action::set_category_value(key("2024-01"), "food", 1.0))
            .unwrap_err();
        assert_eq!(err.action, "SetCategoryValue");
        assert!(store.state().is_none());
    }

    #[test]
    fn test_create_is_unsaved() {
        let store = Store::create(today());
        assert!(store.is_unsaved());
        assert_eq!(store.state(), Some(&BudgetState::initial(today())));
    }

    #[test]
    fn test_loaded_is_saved() {
        let store = Store::loaded(BudgetState::initial(today()));
        assert!(!store.is_unsaved());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_scenario_groceries() {
        let mut store = Store::create(today());
        let state = store.dispatch(Action::set_category_value(key("2024-01"), "groceries", 300.0));
        assert_eq!(
            state.category(&key("2024-01"), "groceries").unwrap().amount,
            Some(300.0)
        );

        let state = store.dispatch(Action::set_category_value(key("2024-01"), "groceries", 0.0));
        assert!(state.month(&key("2024-01")).is_none());
    }

    #[test]
    fn test_change_marks_unsaved() {
        let mut store = Store::loaded(BudgetState::initial(today()));
        store.dispatch(Action::SetName("Home".into()));
        assert!(store.is_unsaved());
        store.mark_saved();
        assert!(!store.is_unsaved());
    }

    #[test]
    fn test_noop_does_not_mark_unsaved() {
        let mut store = Store::loaded(BudgetState::initial(today()));
        store.dispatch(Action::Settings(SettingsAction::RemoveIncomeCategory(Some(
            "nonexistent-id".into(),
        ))));
        assert!(!store.is_unsaved());
        assert!(!store.can_undo());
    }

    #[test]
    fn test_undo_redo() {
        let mut store = Store::loaded(BudgetState::initial(today()));
        store.dispatch(Action::SetName("one".into()));
        store.dispatch(Action::SetName("two".into()));

        assert!(store.undo());
        assert_eq!(store.state().unwrap().display_name(), "one");
        assert!(store.undo());
        assert_eq!(store.state().unwrap().display_name(), "");
        assert!(!store.undo());

        assert!(store.redo());
        assert_eq!(store.state().unwrap().display_name(), "one");

        store.dispatch(Action::SetName("three".into()));
        assert!(!store.can_redo());
    }

    #[test]
    fn test_undo_keeps_old_snapshots_intact() {
        let mut store = Store::loaded(BudgetState::initial(today()));
        store.dispatch(Action::set_category_value(key("2024-01"), "food", 10.0));
        store.dispatch(Action::set_category_value(key("2024-01"), "food", 20.0));
        store.undo();
        assert_eq!(store.state().unwrap().total_assigned(&key("2024-01")), 10.0);
    }

    #[test]
    fn test_history_limit() {
        let mut store = Store::loaded(BudgetState::initial(today())).with_history_limit(2);
        for name in ["a", "b", "c", "d"] {
            store.dispatch(Action::SetName(name.into()));
        }
        assert!(store.undo());
        assert!(store.undo());
        assert!(!store.undo());
        assert_eq!(store.state().unwrap().display_name(), "b");
    }

    #[test]
    fn test_init_clears_history() {
        let mut store = Store::loaded(BudgetState::initial(today()));
        store.dispatch(Action::SetName("a".into()));
        store.dispatch(Action::Init(BudgetState::initial(today())));
        assert!(!store.can_undo());
        assert!(!store.is_unsaved());
    }

    #[test]
    fn test_audit_records_dispatches() {
        let temp = TempDir::new().unwrap();
        let logger = AuditLogger::new(temp.path().join("audit.log"));
        let mut store = Store::new().with_audit(logger.clone());

        store.dispatch(Action::Init(BudgetState::initial(today())));
        store.dispatch(Action::SetName("Home".into()));

        let entries = logger.read_all().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].action, "Init");
        assert_eq!(entries[1].action, "SetName");
        assert_eq!(entries[1].changes, vec!["name: \"\" -> \"Home\""]);
    }
}
