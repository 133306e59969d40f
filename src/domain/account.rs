use rust_decimal::Decimal;
use serde::Serialize;

use crate::domain::{
    props::AccountId,
    record::{Record, RecordError},
};

/// Fields projected when listing accounts for selection.
pub const ACCOUNT_SELECTION_FIELDS: &[&str] = &["id", "account_number", "account_name", "balance"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub id: AccountId,
    pub account_number: String,
    pub account_name: String,
    pub balance: Decimal,
}

impl TryFrom<&Record> for Account {
    type Error = RecordError;

    fn try_from(record: &Record) -> Result<Self, Self::Error> {
        Ok(Account {
            id: AccountId(record.integer("id")?),
            account_number: record.text("account_number")?,
            account_name: record.text("account_name")?,
            balance: record.decimal("balance")?,
        })
    }
}
