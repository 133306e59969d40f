use std::{env, time::Duration};

use color_eyre::eyre::{Result, eyre};

pub const QUERY_TIMEOUT_VAR: &str = "BANK_DESK_QUERY_TIMEOUT_MS";
const DEFAULT_QUERY_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, PartialEq)]
pub struct Settings {
    /// Upper bound for any single store call.
    pub query_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Settings::from_value(env::var(QUERY_TIMEOUT_VAR).ok())
    }

    fn from_value(query_timeout_ms: Option<String>) -> Result<Self> {
        let query_timeout = match query_timeout_ms {
            None => DEFAULT_QUERY_TIMEOUT,
            Some(ms) => match ms.trim().parse::<u64>() {
                Ok(ms) if ms > 0 => Duration::from_millis(ms),
                _ => {
                    return Err(eyre!(
                        "{} must be a positive number of milliseconds, got {:?}",
                        QUERY_TIMEOUT_VAR,
                        ms
                    ));
                }
            },
        };

        Ok(Settings { query_timeout })
    }
}
