use std::sync::Arc;

use derive_more::Display;
use futures::TryFutureExt;
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, error};

use crate::{
    domain::{
        collection::Collection,
        filter::Domain,
        props::{
            AccountStatus, FIXED_DEPOSIT_ACTIVE, LOAN_ACTIVE, TRANSACTION_COMPLETED, TransferStatus,
        },
    },
    guard::FlagGuard,
    services::{Navigator, ViewSpec},
    store::{DataStore, StoreError},
};

/// Point-in-time totals shown on the dashboard. All zero until the first
/// successful refresh.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SummarySnapshot {
    #[serde(rename = "accounts")]
    pub account_count: u64,
    pub total_balance: Decimal,
    #[serde(rename = "completed_transactions")]
    pub transaction_count: u64,
    pub pending_transfers: u64,
    pub active_loans: u64,
    #[serde(rename = "active_fixed_deposits")]
    pub active_fds: u64,
}

#[derive(Debug, PartialEq, Display)]
pub enum DashboardError {
    #[display("loading dashboard failed: {_0}")]
    LoadFailed(StoreError),
    #[display("total balance of active accounts is out of range")]
    BalanceOverflow,
}

impl std::error::Error for DashboardError {}

impl From<StoreError> for DashboardError {
    fn from(e: StoreError) -> Self {
        DashboardError::LoadFailed(e)
    }
}

pub struct DashboardAggregator {
    store: Arc<dyn DataStore>,
    navigator: Arc<dyn Navigator>,
    snapshot: SummarySnapshot,
    loading: bool,
    last_refresh_failed: bool,
}

impl DashboardAggregator {
    pub fn new(store: Arc<dyn DataStore>, navigator: Arc<dyn Navigator>) -> Self {
        DashboardAggregator {
            store,
            navigator,
            snapshot: SummarySnapshot::default(),
            loading: false,
            last_refresh_failed: false,
        }
    }

    pub fn snapshot(&self) -> &SummarySnapshot {
        &self.snapshot
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn last_refresh_failed(&self) -> bool {
        self.last_refresh_failed
    }

    /// Runs the five dashboard queries and replaces the snapshot.
    ///
    /// The snapshot is only replaced when every query succeeds; on failure
    /// the previous snapshot is kept as is and `last_refresh_failed` is set.
    pub async fn refresh(&mut self) -> Result<SummarySnapshot, DashboardError> {
        let _loading = FlagGuard::raise(&mut self.loading);
        let store = &*self.store;

        let active_accounts = Domain::status(AccountStatus::Active);
        let completed_transactions = Domain::status(TRANSACTION_COMPLETED);
        let pending = Domain::status(TransferStatus::Pending);
        let active_loans = Domain::status(LOAN_ACTIVE);
        let active_deposits = Domain::status(FIXED_DEPOSIT_ACTIVE);

        let result = futures::try_join!(
            active_balances(store, &active_accounts),
            store
                .search_count(Collection::Transaction, &completed_transactions)
                .err_into::<DashboardError>(),
            store
                .search_count(Collection::Transfer, &pending)
                .err_into::<DashboardError>(),
            store
                .search_count(Collection::Loan, &active_loans)
                .err_into::<DashboardError>(),
            store
                .search_count(Collection::FixedDeposit, &active_deposits)
                .err_into::<DashboardError>(),
        );

        match result {
            Ok((
                (account_count, total_balance),
                transaction_count,
                pending_transfers,
                active_loans,
                active_fds,
            )) => {
                let snapshot = SummarySnapshot {
                    account_count,
                    total_balance,
                    transaction_count,
                    pending_transfers,
                    active_loans,
                    active_fds,
                };
                debug!("Dashboard refreshed: {:?}", snapshot);

                self.snapshot = snapshot.clone();
                self.last_refresh_failed = false;
                Ok(snapshot)
            }
            Err(e) => {
                error!("Error loading dashboard data: {}", e);

                self.last_refresh_failed = true;
                Err(e)
            }
        }
    }

    pub fn open_accounts(&self) {
        self.navigator.navigate(ViewSpec::list(
            Collection::Account,
            Domain::status(AccountStatus::Active),
        ));
    }

    pub fn open_transactions(&self) {
        self.navigator
            .navigate(ViewSpec::list(Collection::Transaction, Domain::all()));
    }

    pub fn open_pending_transfers(&self) {
        self.navigator.navigate(ViewSpec::list(
            Collection::Transfer,
            Domain::status(TransferStatus::Pending),
        ));
    }
}

// Client-side sum over a full read; fine while active accounts stay few.
async fn active_balances(
    store: &dyn DataStore,
    domain: &Domain,
) -> Result<(u64, Decimal), DashboardError> {
    let accounts = store
        .search_read(Collection::Account, domain, &["balance"])
        .await?;
    let mut total = Decimal::ZERO;
    for account in &accounts {
        let balance = account.decimal("balance").map_err(StoreError::from)?;
        total = total
            .checked_add(balance)
            .ok_or(DashboardError::BalanceOverflow)?;
    }

    Ok((accounts.len() as u64, total))
}
