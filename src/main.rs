use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use moneybudget::cli::{
    handle_budget_command, handle_income_command, handle_log_command, Session,
};
use moneybudget::config::{AppConfig, BudgetPaths};
use moneybudget::logging::init_tracing;

#[derive(Parser)]
#[command(
    name = "moneybudget",
    version,
    about = "Monthly envelope budget files from the command line",
    long_about = "moneybudget keeps a budget as a single JSON document: how much is \
                  assigned to each category every month, which categories roll \
                  over, and which income categories fund the budget."
)]
struct Cli {
    /// Budget file (defaults to the configured budget)
    #[arg(short, long, global = true, env = "MONEYBUDGET_FILE")]
    file: Option<PathBuf>,

    /// Show debug logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    #[command(flatten)]
    Budget(moneybudget::cli::BudgetCommands),

    /// Income category commands
    #[command(subcommand)]
    Income(moneybudget::cli::IncomeCommands),

    /// Show recent entries from the audit log
    Log {
        /// Number of entries to read
        #[arg(short = 'n', long, default_value = "10")]
        count: usize,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Initialize paths and config
    let paths = BudgetPaths::new()?;
    let config = AppConfig::load_or_create(&paths)?;
    let session = Session::new(paths, config, cli.file);

    match cli.command {
        Some(Commands::Budget(cmd)) => handle_budget_command(&session, cmd)?,
        Some(Commands::Income(cmd)) => handle_income_command(&session, cmd)?,
        Some(Commands::Log { count }) => handle_log_command(&session, count)?,
        Some(Commands::Config) => {
            let config = session.config();
            println!("moneybudget Configuration");
            println!("=========================");
            println!("Base directory: {}", session.paths().base_dir().display());
            println!("Config file:    {}", session.paths().config_file().display());
            println!("Audit log:      {}", session.paths().audit_log().display());
            println!("Budget file:    {}", session.file().path().display());
            println!();
            println!("Settings:");
            println!("  Audit enabled: {}", config.audit_enabled);
            println!("  Undo history:  {}", config.history_limit);
            println!("  Pretty JSON:   {}", config.pretty_json);
        }
        None => {
            println!("moneybudget - monthly envelope budgets");
            println!();
            println!("Run 'moneybudget --help' for usage information.");
            println!("Run 'moneybudget new' to create a budget.");
        }
    }

    Ok(())
}
