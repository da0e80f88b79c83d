//! Income category CLI commands

use clap::Subcommand;

use super::{current, Session};
use crate::display::format_income_list;
use crate::error::{BudgetError, BudgetResult};
use crate::models::NewIncomeCategory;
use crate::reducer::SettingsAction;
use crate::store::Store;

/// Income category subcommands
#[derive(Subcommand)]
pub enum IncomeCommands {
    /// Add an income category
    Add {
        /// Category id (leave out to add an unassigned entry)
        id: Option<String>,
        /// Months between receiving and budgeting the money
        #[arg(short, long, allow_negative_numbers = true)]
        available_in: Option<i32>,
    },

    /// Point an income category at a different category id
    Rename {
        /// Current id
        old: String,
        /// New id
        new: String,
    },

    /// Remove an income category
    Remove {
        /// Category id
        id: String,
    },

    /// Set the month offset for an income category
    AvailableIn {
        /// Category id
        id: String,
        /// Months between receiving and budgeting the money
        #[arg(allow_negative_numbers = true)]
        months: i32,
    },

    /// List income categories
    #[command(alias = "ls")]
    List,
}

/// Handle an income command
pub fn handle_income_command(session: &Session, cmd: IncomeCommands) -> BudgetResult<()> {
    match cmd {
        IncomeCommands::Add { id, available_in } => {
            let payload = (id.is_some() || available_in.is_some()).then(|| NewIncomeCategory {
                id: id.clone(),
                available_in,
            });

            let mut store = session.open()?;
            store.dispatch(SettingsAction::AddIncomeCategory(payload).into());
            session.commit(&mut store)?;

            match id {
                Some(id) => println!("Added income category '{}'", id),
                None => println!("Added unassigned income category"),
            }
        }

        IncomeCommands::Rename { old, new } => {
            let mut store = session.open()?;
            require_income(&store, &old)?;
            store.dispatch(
                SettingsAction::UpdateIncomeCategory {
                    old_id: Some(old.clone()),
                    new_id: Some(new.clone()),
                }
                .into(),
            );
            session.commit(&mut store)?;

            println!("Income category '{}' is now '{}'", old, new);
        }

        IncomeCommands::Remove { id } => {
            let mut store = session.open()?;
            require_income(&store, &id)?;
            store.dispatch(SettingsAction::RemoveIncomeCategory(Some(id.clone())).into());
            session.commit(&mut store)?;

            println!("Removed income category '{}'", id);
        }

        IncomeCommands::AvailableIn { id, months } => {
            let mut store = session.open()?;
            require_income(&store, &id)?;
            store.dispatch(
                SettingsAction::SetIncomeAvailableIn {
                    id: Some(id.clone()),
                    available_in: months,
                }
                .into(),
            );
            session.commit(&mut store)?;

            println!("Income from '{}' is available after {} month(s)", id, months);
        }

        IncomeCommands::List => {
            let store = session.open()?;
            println!("{}", format_income_list(&current(&store)?.settings));
        }
    }

    Ok(())
}

/// Lookups that miss are silent in the reducer; the CLI reports them
fn require_income(store: &Store, id: &str) -> BudgetResult<()> {
    current(store)?
        .settings
        .income_position(Some(id))
        .map(|_| ())
        .ok_or_else(|| BudgetError::income_category_not_found(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AppConfig, BudgetPaths};
    use crate::models::IncomeCategory;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn session(temp_dir: &TempDir) -> Session {
        let paths = BudgetPaths::with_base_dir(temp_dir.path().to_path_buf());
        let session = Session::new(paths, AppConfig::default(), None);
        let mut store = session.create(NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
        session.save(&mut store).unwrap();
        session
    }

    fn income(session: &Session) -> Vec<IncomeCategory> {
        session.file().load().unwrap().settings.income_categories.clone()
    }

    #[test]
    fn test_add_rename_remove() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir);

        handle_income_command(
            &session,
            IncomeCommands::Add {
                id: Some("salary".into()),
                available_in: Some(1),
            },
        )
        .unwrap();
        handle_income_command(
            &session,
            IncomeCommands::Add {
                id: None,
                available_in: None,
            },
        )
        .unwrap();
        assert_eq!(
            income(&session),
            vec![IncomeCategory::new("salary", 1), IncomeCategory::unassigned()]
        );

        handle_income_command(
            &session,
            IncomeCommands::Rename {
                old: "salary".into(),
                new: "wages".into(),
            },
        )
        .unwrap();
        handle_income_command(
            &session,
            IncomeCommands::AvailableIn {
                id: "wages".into(),
                months: 0,
            },
        )
        .unwrap();
        assert_eq!(income(&session)[0], IncomeCategory::new("wages", 0));

        handle_income_command(&session, IncomeCommands::Remove { id: "wages".into() }).unwrap();
        assert_eq!(income(&session), vec![IncomeCategory::unassigned()]);
    }

    #[test]
    fn test_unknown_income_category() {
        let temp_dir = TempDir::new().unwrap();
        let session = session(&temp_dir);

        let err = handle_income_command(&session, IncomeCommands::Remove { id: "nope".into() })
            .unwrap_err();
        assert!(err.is_not_found());

        let err = handle_income_command(
            &session,
            IncomeCommands::Rename {
                old: "nope".into(),
                new: "other".into(),
            },
        )
        .unwrap_err();
        assert!(err.is_not_found());
    }
}
