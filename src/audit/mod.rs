//! Audit trail for budget changes
//!
//! Every action dispatched through a [`crate::store::Store`] with an attached
//! logger is recorded in an append-only JSONL file, together with a list of
//! the document locations it changed.
//!
//! - `AuditEntry`: timestamp, action name, budget name and change lines
//! - `AuditLogger`: appends and reads entries
//! - `diff_documents`: leaf-level diff between two serialized documents

mod diff;
mod entry;
mod logger;

pub use diff::{diff_documents, summarize, Change};
pub use entry::{describe_transition, AuditEntry};
pub use logger::AuditLogger;
