#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]

use std::{io, sync::Arc};

use color_eyre::eyre::Result;
use tracing_subscriber::EnvFilter;

use bank_desk::{
    cli::{CliArgs, Command, View},
    csv,
    dashboard::DashboardAggregator,
    host::{ConsoleNotifier, JsonNavigator},
    services::{Notifier, Severity},
    settings::Settings,
    store::{DataStore, TimeoutStore, sqlite::SqliteStore},
    transfer::submitter::TransferSubmitter,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr so stdout stays machine readable.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli_args = CliArgs::load()?;
    let settings = Settings::from_env()?;

    let sqlite = SqliteStore::connect(&cli_args.database_url()).await?;
    let store: Arc<dyn DataStore> = Arc::new(TimeoutStore::new(sqlite, settings.query_timeout));

    match cli_args.command {
        Command::Import {
            collection,
            file_path,
        } => {
            let records = csv::read_records(collection, &file_path)?;
            let ids = store.create(collection, records).await?;
            ConsoleNotifier::stdout().notify(
                &format!("Imported {} records into {}", ids.len(), collection),
                Severity::Info,
            );
        }
        Command::Dashboard => {
            let mut dashboard = DashboardAggregator::new(store, Arc::new(JsonNavigator::stdout()));
            let snapshot = dashboard.refresh().await?;
            csv::print_csv([snapshot])?;
        }
        Command::Accounts => {
            let mut submitter = TransferSubmitter::new(store, Arc::new(ConsoleNotifier::stdout()));
            csv::print_csv(submitter.load_accounts().await?)?;
        }
        Command::Transfer(form) => {
            let mut submitter = TransferSubmitter::new(store, Arc::new(ConsoleNotifier::stdout()));
            *submitter.form_mut() = form;
            submitter.submit().await?;
        }
        Command::Open(view) => {
            let dashboard = DashboardAggregator::new(store, Arc::new(JsonNavigator::stdout()));
            match view {
                View::Accounts => dashboard.open_accounts(),
                View::Transactions => dashboard.open_transactions(),
                View::PendingTransfers => dashboard.open_pending_transfers(),
            }
        }
    }

    Ok(())
}
