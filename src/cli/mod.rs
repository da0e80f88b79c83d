//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the store and the budget file.

pub mod budget;
pub mod income;
pub mod log;

pub use budget::{handle_budget_command, BudgetCommands};
pub use income::{handle_income_command, IncomeCommands};
pub use log::handle_log_command;

use chrono::NaiveDate;
use std::path::PathBuf;
use tracing::info;

use crate::audit::AuditLogger;
use crate::config::{AppConfig, BudgetPaths};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetState, MonthKey};
use crate::storage::BudgetFile;
use crate::store::Store;

/// Everything a command needs: where the budget lives and how to open it
#[derive(Debug, Clone)]
pub struct Session {
    paths: BudgetPaths,
    config: AppConfig,
    file: BudgetFile,
}

impl Session {
    pub fn new(paths: BudgetPaths, config: AppConfig, explicit: Option<PathBuf>) -> Self {
        let mut file = BudgetFile::new(config.budget_file(&paths, explicit));
        if !config.pretty_json {
            file = file.compact();
        }
        Self {
            paths,
            config,
            file,
        }
    }

    pub fn file(&self) -> &BudgetFile {
        &self.file
    }

    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Load the budget file into a store
    pub fn open(&self) -> BudgetResult<Store> {
        let state = self.file.load()?;
        Ok(self.configure(Store::loaded(state)))
    }

    /// A store holding a fresh budget that starts the month before `today`
    pub fn create(&self, today: NaiveDate) -> Store {
        self.configure(Store::create(today))
    }

    fn configure(&self, store: Store) -> Store {
        let store = store.with_history_limit(self.config.history_limit);
        if self.config.audit_enabled {
            store.with_audit(AuditLogger::new(self.paths.audit_log()))
        } else {
            store
        }
    }

    /// Write the store's document if it has unsaved changes
    ///
    /// Returns whether anything was written.
    pub fn commit(&self, store: &mut Store) -> BudgetResult<bool> {
        if !store.is_unsaved() {
            info!(path = %self.file.path().display(), "no changes to save");
            return Ok(false);
        }
        self.save(store)?;
        Ok(true)
    }

    /// Write the store's document unconditionally
    pub fn save(&self, store: &mut Store) -> BudgetResult<()> {
        self.file.save(current(store)?)?;
        store.mark_saved();
        Ok(())
    }
}

/// The store's document; every store opened by a `Session` has one
pub fn current(store: &Store) -> BudgetResult<&BudgetState> {
    store
        .state()
        .ok_or_else(|| BudgetError::Storage("No budget loaded".into()))
}

/// Parse a `YYYY-MM` argument
pub fn parse_month(input: &str) -> BudgetResult<MonthKey> {
    input
        .trim()
        .parse()
        .map_err(|e| BudgetError::Parse(format!("{}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reducer::Action;
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir, config: AppConfig) -> Session {
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        Session::new(paths, config, None)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
    }

    #[test]
    fn test_parse_month() {
        assert_eq!(parse_month(" 2024-03 ").unwrap().to_string(), "2024-03");
        assert!(matches!(parse_month("March"), Err(BudgetError::Parse(_))));
    }

    #[test]
    fn test_create_commit_open() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir, AppConfig::default());

        let mut store = session.create(today());
        assert!(session.commit(&mut store).unwrap());
        assert!(!session.commit(&mut store).unwrap());

        let mut store = session.open().unwrap();
        assert!(!store.is_unsaved());
        store.dispatch(Action::set_category_value(
            "2024-02".parse().unwrap(),
            "rent",
            900.0,
        ));
        assert!(session.commit(&mut store).unwrap());

        let reopened = session.open().unwrap();
        let state = current(&reopened).unwrap();
        assert_eq!(state.total_assigned(&"2024-02".parse().unwrap()), 900.0);
    }

    #[test]
    fn test_audit_follows_config() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir, AppConfig::default());
        let mut store = session.create(today());
        store.dispatch(Action::SetName("Home".into()));
        assert!(session.paths().audit_log().exists());

        let quiet_dir = TempDir::new().unwrap();
        let quiet = session_without_audit(&quiet_dir);
        let mut store = quiet.create(today());
        store.dispatch(Action::SetName("Home".into()));
        assert!(!quiet.paths().audit_log().exists());
    }

    fn session_without_audit(temp_dir: &TempDir) -> Session {
        session(
            temp_dir,
            AppConfig {
                audit_enabled: false,
                ..AppConfig::default()
            },
        )
    }

    #[test]
    fn test_open_missing_budget() {
        let temp_dir = TempDir::new().unwrap();
        let err = session(&temp_dir, AppConfig::default()).open().unwrap_err();
        assert!(err.is_not_found());
    }
}
