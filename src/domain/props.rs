use derive_more::Display;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use shrinkwraprs::Shrinkwrap;

#[derive(
    Shrinkwrap,
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Display,
    Hash,
    PartialOrd,
    Ord,
)]
pub struct AccountId(pub i64);

#[derive(Shrinkwrap, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, Hash)]
pub struct TransferId(pub i64);

#[derive(Shrinkwrap, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, Hash)]
pub struct Amount(pub Decimal);

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AccountStatus {
    #[display("draft")]
    Draft,
    #[display("active")]
    Active,
    #[display("frozen")]
    Frozen,
    #[display("closed")]
    Closed,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferStatus {
    #[display("draft")]
    Draft,
    #[display("pending")]
    Pending,
    #[display("approved")]
    Approved,
    #[display("processing")]
    Processing,
    #[display("completed")]
    Completed,
    #[display("failed")]
    Failed,
    #[display("cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, Display, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferType {
    #[display("internal")]
    Internal,
    #[display("external")]
    External,
    #[display("rtgs")]
    Rtgs,
    #[display("neft")]
    Neft,
    #[display("imps")]
    Imps,
}

// Transactions, loans and fixed deposits are only ever counted, so their
// status vocabularies stay plain literals.
pub const TRANSACTION_COMPLETED: &str = "completed";
pub const LOAN_ACTIVE: &str = "active";
pub const FIXED_DEPOSIT_ACTIVE: &str = "active";
