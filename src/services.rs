use derive_more::Display;
use serde::Serialize;

use crate::domain::{collection::Collection, filter::Domain};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    #[display("info")]
    Info,
    #[display("warning")]
    Warning,
    #[display("success")]
    Success,
    #[display("danger")]
    Danger,
}

/// Surfaces a transient message to the user.
pub trait Notifier: Send + Sync {
    fn notify(&self, message: &str, severity: Severity);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    List,
    Form,
}

/// A request for the host to show records of one collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewSpec {
    #[serde(rename = "res_model")]
    pub collection: Collection,
    pub views: Vec<ViewMode>,
    pub domain: Domain,
}

impl ViewSpec {
    pub fn list(collection: Collection, domain: Domain) -> Self {
        ViewSpec {
            collection,
            views: vec![ViewMode::List, ViewMode::Form],
            domain,
        }
    }
}

pub trait Navigator: Send + Sync {
    fn navigate(&self, view: ViewSpec);
}
