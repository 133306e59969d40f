#![deny(clippy::panic, clippy::unwrap_used, clippy::expect_used)]
#![cfg_attr(test, allow(clippy::panic, clippy::unwrap_used, clippy::expect_used))]

pub mod cli;
pub mod csv;
pub mod dashboard;
pub mod domain;
pub mod guard;
pub mod host;
pub mod services;
pub mod settings;
pub mod store;
#[cfg(test)]
mod testutil;
pub mod transfer;
