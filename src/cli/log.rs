//! Audit log CLI command

use super::Session;
use crate::audit::AuditLogger;
use crate::error::BudgetResult;

/// Print the most recent audit entries, oldest first
pub fn handle_log_command(session: &Session, count: usize) -> BudgetResult<()> {
    let logger = AuditLogger::new(session.paths().audit_log());
    if !logger.exists() {
        println!("No audit entries yet.");
        return Ok(());
    }

    let entries = logger.read_recent(count)?;
    if entries.is_empty() {
        println!("No audit entries yet.");
        return Ok(());
    }

    for entry in entries.iter().filter(|e| !e.is_noop()) {
        println!("{}", entry.format_human_readable());
    }
    let skipped = entries.iter().filter(|e| e.is_noop()).count();
    if skipped > 0 {
        println!("({} action(s) without changes not shown)", skipped);
    }

    Ok(())
}
