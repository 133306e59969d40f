use derive_more::Display;

use crate::store::StoreError;

/// Rejections raised before anything reaches the store. The display text is
/// what the user sees.
#[derive(Debug, PartialEq, Display)]
pub enum ValidationError {
    #[display("Please select both accounts")]
    MissingAccounts,
    #[display("Invalid account {_0:?}")]
    InvalidAccount(String),
    #[display("Invalid amount {_0:?}")]
    InvalidAmount(String),
    #[display("Amount must be greater than zero")]
    NonPositiveAmount,
    #[display("Cannot transfer to the same account")]
    SelfTransfer,
}

impl std::error::Error for ValidationError {}

#[derive(Debug, PartialEq, Display)]
pub enum SubmitError {
    #[display("{_0}")]
    Rejected(ValidationError),
    #[display("Error creating transfer: {_0}")]
    Store(StoreError),
}

impl std::error::Error for SubmitError {}

impl From<ValidationError> for SubmitError {
    fn from(e: ValidationError) -> Self {
        SubmitError::Rejected(e)
    }
}

impl From<StoreError> for SubmitError {
    fn from(e: StoreError) -> Self {
        SubmitError::Store(e)
    }
}
