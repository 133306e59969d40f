use std::sync::Arc;

use tracing::{debug, error, warn};

use crate::{
    domain::{
        account::{ACCOUNT_SELECTION_FIELDS, Account},
        collection::Collection,
        filter::Domain,
        props::{AccountStatus, TransferId},
        transfer::NewTransfer,
    },
    guard::FlagGuard,
    services::{Notifier, Severity},
    store::{DataStore, StoreError},
    transfer::{error::SubmitError, form::TransferForm},
};

/// Quick-transfer form: picks two active accounts and files an internal
/// draft transfer between them.
pub struct TransferSubmitter {
    store: Arc<dyn DataStore>,
    notifier: Arc<dyn Notifier>,
    form: TransferForm,
    accounts: Vec<Account>,
    submitting: bool,
}

impl TransferSubmitter {
    pub fn new(store: Arc<dyn DataStore>, notifier: Arc<dyn Notifier>) -> Self {
        TransferSubmitter {
            store,
            notifier,
            form: TransferForm::default(),
            accounts: vec![],
            submitting: false,
        }
    }

    pub fn form(&self) -> &TransferForm {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut TransferForm {
        &mut self.form
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Refreshes the selectable accounts. On failure the previous list stays.
    pub async fn load_accounts(&mut self) -> Result<&[Account], StoreError> {
        let loaded = self
            .store
            .search_read(
                Collection::Account,
                &Domain::status(AccountStatus::Active),
                ACCOUNT_SELECTION_FIELDS,
            )
            .await
            .and_then(|records| {
                records
                    .iter()
                    .map(|r| Account::try_from(r).map_err(StoreError::from))
                    .collect::<Result<Vec<_>, _>>()
            });

        match loaded {
            Ok(accounts) => {
                debug!("Loaded {} active accounts", accounts.len());
                self.accounts = accounts;
                Ok(&self.accounts)
            }
            Err(e) => {
                error!("Error loading accounts: {}", e);
                Err(e)
            }
        }
    }

    /// Validates the form and creates the transfer. The form is cleared only
    /// when the transfer was created; every outcome is also notified.
    ///
    /// Taking `&mut self` keeps a second submit from starting while one is in
    /// flight on the same form.
    pub async fn submit(&mut self) -> Result<TransferId, SubmitError> {
        let _submitting = FlagGuard::raise(&mut self.submitting);

        let transfer = match self.form.validate() {
            Ok(transfer) => transfer,
            Err(e) => {
                warn!("Transfer rejected: {}", e);
                self.notifier.notify(&e.to_string(), Severity::Warning);
                return Err(e.into());
            }
        };

        match create_transfer(&*self.store, transfer).await {
            Ok(id) => {
                debug!("Created transfer {}", id);
                self.notifier
                    .notify("Transfer created successfully", Severity::Success);
                self.form.clear();
                Ok(id)
            }
            Err(e) => {
                let e = SubmitError::Store(e);
                error!("{}", e);
                self.notifier.notify(&e.to_string(), Severity::Danger);
                Err(e)
            }
        }
    }
}

async fn create_transfer(
    store: &dyn DataStore,
    transfer: NewTransfer,
) -> Result<TransferId, StoreError> {
    debug!(
        "Creating transfer of {} from {} to {}",
        transfer.amount, transfer.from_account_id, transfer.to_account_id
    );

    let ids = store.create(Collection::Transfer, vec![transfer.into()]).await?;
    ids.first()
        .map(|id| TransferId(*id))
        .ok_or_else(|| StoreError::Write("no id returned for created transfer".to_owned()))
}
