use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use xpt::core::log::init_logging;
use xpt::core::record::RecordKind;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

impl From<Commands> for xpt::AppCommand {
    fn from(cmd: Commands) -> xpt::AppCommand {
        match cmd {
            Commands::Dashboard => xpt::AppCommand::Dashboard,
            Commands::Income => xpt::AppCommand::Ledger(RecordKind::Income),
            Commands::Expense => xpt::AppCommand::Ledger(RecordKind::Expense),
            Commands::Add {
                kind,
                category,
                amount,
                date,
            } => xpt::AppCommand::Add {
                kind,
                category,
                amount,
                date,
            },
            Commands::Delete { kind, id } => xpt::AppCommand::Delete { kind, id },
            Commands::Export { output } => xpt::AppCommand::Export { output },
            Commands::Login { email } => xpt::AppCommand::Login { email },
            Commands::Signup { name, email } => xpt::AppCommand::Signup { name, email },
            Commands::Logout => xpt::AppCommand::Logout,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display balance, breakdown and recent transactions
    Dashboard,
    /// Display income totals, daily chart and records
    Income,
    /// Display expense totals, daily chart and records
    Expense,
    /// Record a new income or expense transaction
    Add {
        /// Record kind: income or expense
        kind: RecordKind,
        /// Category label, e.g. "Groceries"
        #[arg(long)]
        category: String,
        /// Amount in the configured currency
        #[arg(long)]
        amount: f64,
        /// Transaction date (YYYY-MM-DD or RFC 3339); defaults to now
        #[arg(long)]
        date: Option<String>,
    },
    /// Delete a transaction by its id
    Delete {
        /// Record kind: income or expense
        kind: RecordKind,
        /// Id shown in the income/expense record tables
        id: String,
    },
    /// Export all transactions to a CSV file
    Export {
        /// Output file path; defaults to Transactions_<today>.csv
        #[arg(short, long)]
        output: Option<String>,
    },
    /// Log in and store the auth token locally
    Login {
        /// Email address of the account
        #[arg(long)]
        email: String,
    },
    /// Create an account and log in
    Signup {
        /// Full name for the new account
        #[arg(long)]
        name: String,
        /// Email address for the new account
        #[arg(long)]
        email: String,
    },
    /// Remove the stored auth token
    Logout,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => xpt::cli::setup::setup(),
        Some(cmd) => xpt::run_command(cmd.into(), cli.config_path.as_deref()).await,
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
