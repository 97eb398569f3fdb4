pub mod cli;
pub mod core;
pub mod export;
pub mod providers;
pub mod store;

use crate::core::config::AppConfig;
use crate::core::record::RecordKind;
use crate::providers::ExpenseApiClient;
use crate::store::{FileTokenStore, TokenStore};
use anyhow::Result;
use std::sync::Arc;
use tracing::{debug, info};

/// Application commands, decoupled from the argument parser so integration
/// tests can drive the app directly.
pub enum AppCommand {
    Dashboard,
    Ledger(RecordKind),
    Add {
        kind: RecordKind,
        category: String,
        amount: f64,
        date: Option<String>,
    },
    Delete {
        kind: RecordKind,
        id: String,
    },
    Export {
        output: Option<String>,
    },
    Login {
        email: String,
    },
    Signup {
        name: String,
        email: String,
    },
    Logout,
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("Expense Tracker starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data_path = config.default_data_path()?;
    let token_store: Arc<dyn TokenStore> = Arc::new(FileTokenStore::new(&data_path));
    let client = ExpenseApiClient::new(&config.api.base_url, Arc::clone(&token_store));

    match command {
        AppCommand::Dashboard => {
            cli::dashboard::run(&client, &config.currency_symbol, config.chart_window_days).await
        }
        AppCommand::Ledger(kind) => {
            cli::ledger::run(&client, kind, &config.currency_symbol, config.chart_window_days).await
        }
        AppCommand::Add {
            kind,
            category,
            amount,
            date,
        } => cli::entry::add(&client, kind, &category, amount, date.as_deref()).await,
        AppCommand::Delete { kind, id } => cli::entry::delete(&client, kind, &id).await,
        AppCommand::Export { output } => {
            cli::export::run(&client, &config.currency_symbol, output.as_deref()).await
        }
        AppCommand::Login { email } => {
            cli::account::login(&client, token_store.as_ref(), &email).await
        }
        AppCommand::Signup { name, email } => {
            cli::account::signup(&client, token_store.as_ref(), &name, &email).await
        }
        AppCommand::Logout => cli::account::logout(token_store.as_ref()),
    }
}
