use rust_decimal::Decimal;

use crate::{
    domain::{
        props::{AccountId, Amount},
        transfer::NewTransfer,
    },
    transfer::error::ValidationError,
};

/// Raw quick-transfer input, as typed or selected by the user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransferForm {
    pub from_account: Option<String>,
    pub to_account: Option<String>,
    /// Empty reads as zero.
    pub amount: String,
    pub description: String,
}

impl TransferForm {
    pub fn new(from_account: &str, to_account: &str, amount: &str) -> Self {
        TransferForm {
            from_account: Some(from_account.to_owned()),
            to_account: Some(to_account.to_owned()),
            amount: amount.to_owned(),
            description: String::new(),
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = description.to_owned();
        self
    }

    pub fn clear(&mut self) {
        *self = TransferForm::default();
    }

    /// Checks, in this order, that both accounts are chosen, that the
    /// amount is positive and that the accounts differ. The first failing
    /// rule wins.
    pub fn validate(&self) -> Result<NewTransfer, ValidationError> {
        let (from, to) = match (selected(&self.from_account), selected(&self.to_account)) {
            (Some(from), Some(to)) => (parse_account_id(from)?, parse_account_id(to)?),
            _ => return Err(ValidationError::MissingAccounts),
        };

        let amount = parse_amount(&self.amount)?;
        if amount <= Decimal::ZERO {
            return Err(ValidationError::NonPositiveAmount);
        }

        if from == to {
            return Err(ValidationError::SelfTransfer);
        }

        Ok(NewTransfer::internal_draft(
            from,
            to,
            Amount(amount),
            self.description.clone(),
        ))
    }
}

fn selected(account: &Option<String>) -> Option<&str> {
    account.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_account_id(raw: &str) -> Result<AccountId, ValidationError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(AccountId(id)),
        _ => Err(ValidationError::InvalidAccount(raw.to_owned())),
    }
}

fn parse_amount(raw: &str) -> Result<Decimal, ValidationError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(Decimal::ZERO);
    }

    raw.parse::<Decimal>()
        .map_err(|_| ValidationError::InvalidAmount(raw.to_owned()))
}
