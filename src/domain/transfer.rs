use crate::domain::{
    props::{AccountId, Amount, TransferStatus, TransferType},
    record::Record,
};

/// A validated transfer, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransfer {
    pub from_account_id: AccountId,
    pub to_account_id: AccountId,
    pub transfer_type: TransferType,
    pub amount: Amount,
    pub description: String,
    pub status: TransferStatus,
}

impl NewTransfer {
    /// Internal transfers always start out as drafts.
    pub fn internal_draft(
        from_account_id: AccountId,
        to_account_id: AccountId,
        amount: Amount,
        description: String,
    ) -> Self {
        NewTransfer {
            from_account_id,
            to_account_id,
            transfer_type: TransferType::Internal,
            amount,
            description,
            status: TransferStatus::Draft,
        }
    }
}

impl From<NewTransfer> for Record {
    fn from(t: NewTransfer) -> Self {
        Record::new()
            .with("from_account_id", *t.from_account_id)
            .with("to_account_id", *t.to_account_id)
            .with("transfer_type", t.transfer_type.to_string())
            .with("amount", *t.amount)
            .with("description", t.description)
            .with("status", t.status.to_string())
    }
}
