use std::str::FromStr;

use derive_more::Display;
use serde::{Serialize, Serializer};

use crate::domain::record::RecordError;

/// Named sets of records in the host store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Collection {
    #[display("bank.account")]
    Account,
    #[display("bank.transaction")]
    Transaction,
    #[display("bank.transfer")]
    Transfer,
    #[display("bank.loan")]
    Loan,
    #[display("bank.fixed.deposit")]
    FixedDeposit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Integer,
    Decimal,
    Text,
}

pub struct Field {
    pub name: &'static str,
    pub kind: FieldKind,
}

const fn field(name: &'static str, kind: FieldKind) -> Field {
    Field { name, kind }
}

const ACCOUNT_FIELDS: &[Field] = &[
    field("id", FieldKind::Integer),
    field("account_number", FieldKind::Text),
    field("account_name", FieldKind::Text),
    field("balance", FieldKind::Decimal),
    field("status", FieldKind::Text),
];

const TRANSACTION_FIELDS: &[Field] = &[
    field("id", FieldKind::Integer),
    field("account_id", FieldKind::Integer),
    field("amount", FieldKind::Decimal),
    field("status", FieldKind::Text),
];

const TRANSFER_FIELDS: &[Field] = &[
    field("id", FieldKind::Integer),
    field("from_account_id", FieldKind::Integer),
    field("to_account_id", FieldKind::Integer),
    field("transfer_type", FieldKind::Text),
    field("amount", FieldKind::Decimal),
    field("description", FieldKind::Text),
    field("status", FieldKind::Text),
];

const LOAN_FIELDS: &[Field] = &[
    field("id", FieldKind::Integer),
    field("principal", FieldKind::Decimal),
    field("status", FieldKind::Text),
];

const FIXED_DEPOSIT_FIELDS: &[Field] = &[
    field("id", FieldKind::Integer),
    field("deposit_amount", FieldKind::Decimal),
    field("status", FieldKind::Text),
];

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Account,
        Collection::Transaction,
        Collection::Transfer,
        Collection::Loan,
        Collection::FixedDeposit,
    ];

    pub fn table(&self) -> &'static str {
        match self {
            Collection::Account => "accounts",
            Collection::Transaction => "transactions",
            Collection::Transfer => "transfers",
            Collection::Loan => "loans",
            Collection::FixedDeposit => "fixed_deposits",
        }
    }

    pub fn fields(&self) -> &'static [Field] {
        match self {
            Collection::Account => ACCOUNT_FIELDS,
            Collection::Transaction => TRANSACTION_FIELDS,
            Collection::Transfer => TRANSFER_FIELDS,
            Collection::Loan => LOAN_FIELDS,
            Collection::FixedDeposit => FIXED_DEPOSIT_FIELDS,
        }
    }

    pub fn field(&self, name: &str) -> Result<&'static Field, RecordError> {
        self.fields()
            .iter()
            .find(|f| f.name == name)
            .ok_or_else(|| RecordError::UnknownField(format!("{}.{}", self, name)))
    }
}

impl FromStr for Collection {
    type Err = RecordError;

    /// Accepts either the host model name or the table name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Collection::ALL
            .into_iter()
            .find(|c| c.to_string() == s || c.table() == s)
            .ok_or_else(|| RecordError::UnknownCollection(s.to_owned()))
    }
}

impl Serialize for Collection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_model_and_table_names() {
        assert_eq!("bank.fixed.deposit".parse::<Collection>(), Ok(Collection::FixedDeposit));
        assert_eq!("transfers".parse::<Collection>(), Ok(Collection::Transfer));
        assert_eq!(
            "bank.customer".parse::<Collection>(),
            Err(RecordError::UnknownCollection("bank.customer".to_owned()))
        );
    }

    #[test]
    fn rejects_fields_outside_schema() {
        assert_eq!(Collection::Account.field("balance").map(|f| f.kind), Ok(FieldKind::Decimal));
        assert!(matches!(
            Collection::Loan.field("balance"),
            Err(RecordError::UnknownField(f)) if f == "bank.loan.balance"
        ));
    }
}
