//! moneybudget - the state model of a monthly envelope budget
//!
//! A budget is one JSON document: a sparse map of months to per-category
//! allocations, plus settings (accounts, currency, precision, start date and
//! income categories). This crate validates such documents and evolves them
//! through a closed set of actions.
//!
//! # Architecture
//!
//! - `models`: The document types (`BudgetState`, `MonthKey`, `Category`, ...)
//! - `schema`: Validator turning untrusted JSON into a `BudgetState`
//! - `reducer`: Actions and the pure transition function
//! - `store`: Dispatch point with unsaved tracking and undo/redo
//! - `storage`: Atomic JSON file persistence
//! - `audit`: Append-only log of dispatched actions
//! - `config`: Paths and application preferences
//! - `cli` / `display`: Command handlers and terminal output
//!
//! # Example
//!
//! ```rust,ignore
//! use moneybudget::{Action, Store};
//!
//! let mut store = Store::loaded(moneybudget::decode(&raw)?);
//! store.dispatch(Action::set_category_value("2024-03".parse()?, "rent", 950.0));
//! ```

pub mod audit;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod models;
pub mod reducer;
pub mod schema;
pub mod storage;
pub mod store;

pub use error::{BudgetError, BudgetResult, IllegalTransition};
pub use models::BudgetState;
pub use reducer::{apply, reduce, Action, SettingsAction};
pub use schema::{decode, decode_strict, ValidationError, Violation};
pub use store::Store;
