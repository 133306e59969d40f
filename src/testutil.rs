use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
};

use async_trait::async_trait;

use crate::{
    domain::{collection::Collection, filter::Domain, record::Record},
    services::{Navigator, Notifier, Severity, ViewSpec},
    store::{DataStore, StoreError},
};

/// Store double keeping records in memory, with switchable failures.
#[derive(Default)]
pub struct InMemoryStore {
    records: Mutex<HashMap<Collection, Vec<Record>>>,
    failing: Mutex<HashSet<Collection>>,
    create_error: Option<String>,
    hanging: bool,
    calls: Mutex<Vec<String>>,
}

impl InMemoryStore {
    pub fn with_records(self, collection: Collection, records: Vec<Record>) -> Self {
        self.set_records(collection, records);
        self
    }

    pub fn set_records(&self, collection: Collection, records: Vec<Record>) {
        self.records.lock().unwrap().insert(collection, records);
    }

    /// Reads and counts on `collection` fail.
    pub fn failing_on(self, collection: Collection) -> Self {
        self.fail_on(collection);
        self
    }

    pub fn fail_on(&self, collection: Collection) {
        self.failing.lock().unwrap().insert(collection);
    }

    pub fn heal(&self) {
        self.failing.lock().unwrap().clear();
    }

    pub fn failing_create(mut self, message: &str) -> Self {
        self.create_error = Some(message.to_owned());
        self
    }

    /// Every call waits forever.
    pub fn hanging(mut self) -> Self {
        self.hanging = true;
        self
    }

    pub fn records(&self, collection: Collection) -> Vec<Record> {
        self.records
            .lock()
            .unwrap()
            .get(&collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn create_calls(&self) -> usize {
        self.calls().iter().filter(|c| c.starts_with("create")).count()
    }

    async fn enter(&self, call: String, collection: Collection) -> Result<(), StoreError> {
        self.calls.lock().unwrap().push(call);
        if self.hanging {
            futures::future::pending::<()>().await;
        }
        if self.failing.lock().unwrap().contains(&collection) {
            return Err(StoreError::Query(format!("{} unavailable", collection)));
        }
        Ok(())
    }

    fn matching(&self, collection: Collection, domain: &Domain) -> Vec<Record> {
        self.records(collection)
            .into_iter()
            .filter(|r| domain.conditions().iter().all(|c| r.get(c.field()) == Some(c.value())))
            .collect()
    }
}

#[async_trait]
impl DataStore for InMemoryStore {
    async fn search_read(
        &self,
        collection: Collection,
        domain: &Domain,
        fields: &[&str],
    ) -> Result<Vec<Record>, StoreError> {
        self.enter(format!("search_read {}", collection), collection).await?;

        Ok(self
            .matching(collection, domain)
            .into_iter()
            .map(|r| {
                let mut projected = Record::new();
                for field in fields {
                    if let Some(v) = r.get(field) {
                        projected.insert(field, v.clone());
                    }
                }
                projected
            })
            .collect())
    }

    async fn search_count(
        &self,
        collection: Collection,
        domain: &Domain,
    ) -> Result<u64, StoreError> {
        self.enter(format!("search_count {}", collection), collection).await?;

        Ok(self.matching(collection, domain).len() as u64)
    }

    async fn create(
        &self,
        collection: Collection,
        records: Vec<Record>,
    ) -> Result<Vec<i64>, StoreError> {
        self.enter(format!("create {}", collection), collection).await?;
        if let Some(message) = &self.create_error {
            return Err(StoreError::Write(message.clone()));
        }

        let mut all = self.records.lock().unwrap();
        let stored = all.entry(collection).or_default();
        let mut ids = vec![];
        for record in records {
            let id = stored.len() as i64 + 1;
            stored.push(record.with("id", id));
            ids.push(id);
        }
        Ok(ids)
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    messages: Mutex<Vec<(String, Severity)>>,
}

impl RecordingNotifier {
    pub fn messages(&self) -> Vec<(String, Severity)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(String, Severity)> {
        self.messages().pop()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, message: &str, severity: Severity) {
        self.messages.lock().unwrap().push((message.to_owned(), severity));
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    views: Mutex<Vec<ViewSpec>>,
}

impl RecordingNavigator {
    pub fn views(&self) -> Vec<ViewSpec> {
        self.views.lock().unwrap().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, view: ViewSpec) {
        self.views.lock().unwrap().push(view);
    }
}
