use std::env;

use color_eyre::eyre::{OptionExt, Result, eyre};

use crate::{domain::collection::Collection, transfer::form::TransferForm};

pub struct CliArgs {
    pub database_path: String,
    pub command: Command,
}

#[derive(Debug, PartialEq)]
pub enum Command {
    Import {
        collection: Collection,
        file_path: String,
    },
    Dashboard,
    Accounts,
    Transfer(TransferForm),
    Open(View),
}

#[derive(Debug, PartialEq)]
pub enum View {
    Accounts,
    Transactions,
    PendingTransfers,
}

impl CliArgs {
    pub fn load() -> Result<Self> {
        CliArgs::parse(env::args().skip(1))
    }

    fn parse(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut args = args.into_iter();

        let database_path = args.next().ok_or_eyre("Database path not passed")?;
        let command = args.next().ok_or_eyre("Command not passed")?;

        let command = match command.as_str() {
            "import" => {
                let collection = args
                    .next()
                    .ok_or_eyre("Collection not passed")?
                    .parse::<Collection>()
                    .map_err(|e| eyre!(e))?;
                let file_path = args.next().ok_or_eyre("Input file not passed")?;
                Command::Import {
                    collection,
                    file_path,
                }
            }
            "dashboard" => Command::Dashboard,
            "accounts" => Command::Accounts,
            "transfer" => {
                let from = args.next().ok_or_eyre("Source account not passed")?;
                let to = args.next().ok_or_eyre("Destination account not passed")?;
                let amount = args.next().ok_or_eyre("Amount not passed")?;
                let description = args.collect::<Vec<_>>().join(" ");
                Command::Transfer(
                    TransferForm::new(&from, &to, &amount).with_description(&description),
                )
            }
            "open" => match args.next().ok_or_eyre("View not passed")?.as_str() {
                "accounts" => Command::Open(View::Accounts),
                "transactions" => Command::Open(View::Transactions),
                "pending-transfers" => Command::Open(View::PendingTransfers),
                other => return Err(eyre!("Unknown view: {}", other)),
            },
            other => return Err(eyre!("Unknown command: {}", other)),
        };

        Ok(CliArgs {
            database_path,
            command,
        })
    }

    pub fn database_url(&self) -> String {
        format!("sqlite:{}?mode=rwc", self.database_path)
    }
}
