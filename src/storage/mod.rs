//! JSON file persistence for budget documents
//!
//! Loading goes bytes → JSON → schema validation; saving serializes the
//! document and writes it atomically.

pub mod file_io;

pub use file_io::{json_file_valid, read_json_value, write_json_atomic};

use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::BudgetResult;
use crate::models::BudgetState;
use crate::schema;

/// One budget document on disk
#[derive(Debug, Clone)]
pub struct BudgetFile {
    path: PathBuf,
    pretty: bool,
}

impl BudgetFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            pretty: true,
        }
    }

    /// Write compact JSON instead of indented JSON
    pub fn compact(mut self) -> Self {
        self.pretty = false;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load and validate the document
    pub fn load(&self) -> BudgetResult<BudgetState> {
        let raw = read_json_value(&self.path)?;
        let state = schema::decode(&raw)?;
        info!(path = %self.path.display(), months = state.budgets.len(), "budget loaded");
        Ok(state)
    }

    /// Load, also rejecting fields the schema does not know
    pub fn load_strict(&self) -> BudgetResult<BudgetState> {
        let raw = read_json_value(&self.path)?;
        Ok(schema::decode_strict(&raw)?)
    }

    /// Persist the document
    pub fn save(&self, state: &BudgetState) -> BudgetResult<()> {
        write_json_atomic(&self.path, state, self.pretty)?;
        info!(path = %self.path.display(), "budget saved");
        Ok(())
    }
}
