//! Configuration module for moneybudget
//!
//! - Path resolution (environment override, XDG, APPDATA)
//! - Application preferences (audit, undo history, default budget file)

pub mod paths;
pub mod settings;

pub use paths::BudgetPaths;
pub use settings::AppConfig;
