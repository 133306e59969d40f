use std::time::Duration;

use async_trait::async_trait;
use derive_more::Display;

use crate::domain::{
    collection::Collection,
    filter::Domain,
    record::{Record, RecordError},
};

pub mod sqlite;

#[derive(Debug, PartialEq, Display)]
pub enum StoreError {
    #[display("query failed: {_0}")]
    Query(String),
    #[display("{_0}")]
    Write(String),
    #[display("{_0} timed out after {_1:?}")]
    Timeout(String, Duration),
    #[display("{_0}")]
    Record(RecordError),
}

impl std::error::Error for StoreError {}

impl From<RecordError> for StoreError {
    fn from(e: RecordError) -> Self {
        StoreError::Record(e)
    }
}

/// The host's record store: search, count and insert over named collections.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Records matching `domain`, each holding only `fields`.
    async fn search_read(
        &self,
        collection: Collection,
        domain: &Domain,
        fields: &[&str],
    ) -> Result<Vec<Record>, StoreError>;

    async fn search_count(
        &self,
        collection: Collection,
        domain: &Domain,
    ) -> Result<u64, StoreError>;

    /// Inserts one record per entry, all or nothing, returning the new ids in order.
    async fn create(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<i64>, StoreError>;
}

/// Bounds every call of the wrapped store, so a hung query surfaces as
/// `StoreError::Timeout` instead of leaving callers waiting.
pub struct TimeoutStore<S> {
    inner: S,
    timeout: Duration,
}

impl<S: DataStore> TimeoutStore<S> {
    pub fn new(inner: S, timeout: Duration) -> Self {
        TimeoutStore { inner, timeout }
    }
}

#[async_trait]
impl<S: DataStore> DataStore for TimeoutStore<S> {
    async fn search_read(
        &self,
        collection: Collection,
        domain: &Domain,
        fields: &[&str],
    ) -> Result<Vec<Record>, StoreError> {
        tokio::time::timeout(self.timeout, self.inner.search_read(collection, domain, fields))
            .await
            .map_err(|_| StoreError::Timeout(format!("reading {}", collection), self.timeout))?
    }

    async fn search_count(
        &self,
        collection: Collection,
        domain: &Domain,
    ) -> Result<u64, StoreError> {
        tokio::time::timeout(self.timeout, self.inner.search_count(collection, domain))
            .await
            .map_err(|_| StoreError::Timeout(format!("counting {}", collection), self.timeout))?
    }

    async fn create(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<i64>, StoreError> {
        tokio::time::timeout(self.timeout, self.inner.create(collection, records))
            .await
            .map_err(|_| StoreError::Timeout(format!("creating {}", collection), self.timeout))?
    }
}
