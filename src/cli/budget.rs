//! Budget CLI commands
//!
//! Creating and validating budget files, assigning money to categories, and
//! replaying scripted actions.

use chrono::Local;
use clap::{Subcommand, ValueEnum};
use std::path::PathBuf;

use super::{current, parse_month, Session};
use crate::audit::describe_transition;
use crate::display::{format_month, format_overview, format_settings};
use crate::error::{BudgetError, BudgetResult};
use crate::reducer::{Action, SettingsAction};
use crate::schema;
use crate::storage::read_json_value;

/// Rollover switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Toggle {
    On,
    Off,
}

impl Toggle {
    fn is_on(self) -> bool {
        self == Toggle::On
    }
}

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new budget file
    New {
        /// Budget name
        #[arg(short, long)]
        name: Option<String>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Check a budget file against the schema and list every problem
    Validate {
        /// Also reject fields the schema does not know
        #[arg(long)]
        strict: bool,
    },

    /// Show the budget overview, or one month in detail
    Show {
        /// Month to show (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },

    /// Assign an amount to a category for a month
    Assign {
        /// Month (YYYY-MM)
        month: String,
        /// Category id
        category: String,
        /// Amount; 0 clears the assignment
        #[arg(allow_negative_numbers = true)]
        amount: f64,
    },

    /// Turn rollover on or off for a category in a month
    Rollover {
        /// Month (YYYY-MM)
        month: String,
        /// Category id
        category: String,
        #[arg(value_enum)]
        state: Toggle,
    },

    /// Rename the budget
    Rename {
        /// New name
        name: String,
    },

    /// Collapse (or expand) a category row
    Collapse {
        /// Category id
        category: String,
        /// Expand instead of collapse
        #[arg(long)]
        expand: bool,
    },

    /// Apply actions from a JSON file (one action or an array)
    Apply {
        /// Path to the actions file
        actions: PathBuf,
    },
}

/// Handle a budget command
pub fn handle_budget_command(session: &Session, cmd: BudgetCommands) -> BudgetResult<()> {
    match cmd {
        BudgetCommands::New { name, force } => {
            let file = session.file();
            if file.exists() && !force {
                return Err(BudgetError::Storage(format!(
                    "{} already exists (use --force to overwrite)",
                    file.path().display()
                )));
            }

            let mut store = session.create(Local::now().date_naive());
            if let Some(name) = name {
                store.dispatch(Action::SetName(name));
            }
            session.save(&mut store)?;

            println!("Created budget at {}", file.path().display());
        }

        BudgetCommands::Validate { strict } => {
            let path = session.file().path();
            let raw = read_json_value(path)?;
            let state = if strict {
                schema::decode_strict(&raw)?
            } else {
                schema::decode(&raw)?
            };

            println!(
                "{} is a valid budget ({} budgeted month{})",
                path.display(),
                state.budgets.len(),
                if state.budgets.len() == 1 { "" } else { "s" }
            );
        }

        BudgetCommands::Show { month } => {
            let store = session.open()?;
            let state = current(&store)?;
            match month {
                Some(month) => {
                    let key = parse_month(&month)?;
                    println!("{}", format_month(state, &key));
                }
                None => {
                    println!("{}", format_settings(state));
                    println!("{}", format_overview(state));
                }
            }
        }

        BudgetCommands::Assign {
            month,
            category,
            amount,
        } => {
            let key = parse_month(&month)?;
            if !amount.is_finite() {
                return Err(BudgetError::Parse(format!("Invalid amount: {}", amount)));
            }

            let mut store = session.open()?;
            store.dispatch(Action::set_category_value(key, category.clone(), amount));
            session.commit(&mut store)?;

            let state = current(&store)?;
            println!(
                "Assigned {} to '{}' for {}",
                crate::display::format_amount(
                    amount,
                    state.settings.fraction_digits,
                    &state.settings.currency
                ),
                category,
                key
            );
        }

        BudgetCommands::Rollover {
            month,
            category,
            state,
        } => {
            let key = parse_month(&month)?;
            let mut store = session.open()?;
            store.dispatch(Action::set_category_rollover(
                key,
                category.clone(),
                state.is_on(),
            ));
            session.commit(&mut store)?;

            println!(
                "Rollover {} for '{}' in {}",
                if state.is_on() { "enabled" } else { "disabled" },
                category,
                key
            );
        }

        BudgetCommands::Rename { name } => {
            let mut store = session.open()?;
            store.dispatch(Action::SetName(name.clone()));
            session.commit(&mut store)?;

            println!("Budget renamed to '{}'", name);
        }

        BudgetCommands::Collapse { category, expand } => {
            let mut store = session.open()?;
            store.dispatch(
                SettingsAction::SetCategoryCollapsed {
                    id: category.clone(),
                    collapsed: !expand,
                }
                .into(),
            );
            session.commit(&mut store)?;

            println!(
                "Category '{}' {}",
                category,
                if expand { "expanded" } else { "collapsed" }
            );
        }

        BudgetCommands::Apply { actions } => {
            let actions = read_actions(&actions)?;
            let mut store = session.open()?;
            let before = current(&store)?.clone();

            for action in &actions {
                store
                    .try_dispatch(action.clone())
                    .map_err(|e| BudgetError::Storage(e.to_string()))?;
            }
            // An Init in the batch resets the unsaved flag, so always write
            session.save(&mut store)?;

            println!(
                "Applied {} action{} to {}",
                actions.len(),
                if actions.len() == 1 { "" } else { "s" },
                session.file().path().display()
            );
            match describe_transition(&before, current(&store)?) {
                Some(summary) => println!("Changes: {}", summary),
                None => println!("No changes"),
            }
        }
    }

    Ok(())
}

/// Read a single action or an array of actions
fn read_actions(path: &std::path::Path) -> BudgetResult<Vec<Action>> {
    let raw = read_json_value(path)?;
    let parsed = if raw.is_array() {
        serde_json::from_value(raw)
    } else {
        serde_json::from_value(raw).map(|action| vec![action])
    };
    parsed.map_err(|e| BudgetError::Parse(format!("Invalid actions file: {}", e)))
}
