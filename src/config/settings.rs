//! Application configuration
//!
//! Preferences of the moneybudget tool itself, as opposed to the settings
//! stored inside each budget document.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use super::paths::BudgetPaths;
use crate::error::BudgetError;
use crate::store::DEFAULT_HISTORY_LIMIT;

/// Application configuration stored in `config.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Record dispatched actions in the audit log
    #[serde(default = "default_true")]
    pub audit_enabled: bool,

    /// Undo steps kept in memory
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,

    /// Budget file used when none is given on the command line
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_budget: Option<PathBuf>,

    /// Indent saved budget files
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

fn default_schema_version() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            audit_enabled: true,
            history_limit: default_history_limit(),
            default_budget: None,
            pretty_json: true,
        }
    }
}

impl AppConfig {
    /// Load the config from disk, or defaults if the file doesn't exist
    pub fn load_or_create(paths: &BudgetPaths) -> Result<Self, BudgetError> {
        let config_path = paths.config_file();

        if !config_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path)
            .map_err(|e| BudgetError::Io(format!("Failed to read config file: {}", e)))?;

        serde_json::from_str(&contents)
            .map_err(|e| BudgetError::Config(format!("Failed to parse config file: {}", e)))
    }

    /// Save the config to disk
    pub fn save(&self, paths: &BudgetPaths) -> Result<(), BudgetError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| BudgetError::Config(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(paths.config_file(), contents)
            .map_err(|e| BudgetError::Io(format!("Failed to write config file: {}", e)))
    }

    /// Budget file to use: explicit argument, configured default, or the
    /// default location under the base directory
    pub fn budget_file(&self, paths: &BudgetPaths, explicit: Option<PathBuf>) -> PathBuf {
        explicit
            .or_else(|| self.default_budget.clone())
            .unwrap_or_else(|| paths.default_budget_file())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert!(config.audit_enabled);
        assert!(config.pretty_json);
        assert_eq!(config.history_limit, DEFAULT_HISTORY_LIMIT);
        assert_eq!(config.default_budget, None);
    }

    #[test]
    fn test_load_missing_returns_default() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        assert_eq!(AppConfig::load_or_create(&paths).unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().join("cfg"));

        let config = AppConfig {
            audit_enabled: false,
            history_limit: 5,
            default_budget: Some(PathBuf::from("/tmp/home.json")),
            ..AppConfig::default()
        };
        config.save(&paths).unwrap();

        let loaded = AppConfig::load_or_create(&paths).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.config_file(), r#"{"audit_enabled": false}"#).unwrap();

        let loaded = AppConfig::load_or_create(&paths).unwrap();
        assert!(!loaded.audit_enabled);
        assert!(loaded.pretty_json);
        assert_eq!(loaded.history_limit, DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.config_file(), "not json").unwrap();

        let err = AppConfig::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, BudgetError::Config(_)));
    }

    #[test]
    fn test_budget_file_resolution() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut config = AppConfig::default();

        assert_eq!(config.budget_file(&paths, None), paths.default_budget_file());

        config.default_budget = Some(PathBuf::from("configured.json"));
        assert_eq!(
            config.budget_file(&paths, None),
            PathBuf::from("configured.json")
        );
        assert_eq!(
            config.budget_file(&paths, Some(PathBuf::from("explicit.json"))),
            PathBuf::from("explicit.json")
        );
    }
}
