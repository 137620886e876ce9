use std::time::Duration;

use crate::{ConfigError, Lookup};

pub const DEFAULT_ADDRESS: &str = "localhost:9999";
pub const DEFAULT_TIMEOUT_SECS: u64 = 4;
pub const DEFAULT_IDLE_TIMEOUT_SECS: u64 = 60;

/// Listener settings.
///
/// `timeout` bounds a whole request. `idle_timeout` bounds how long an unused
/// pooled database connection is kept open.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpServerConfig {
    pub address: String,
    pub timeout: Duration,
    pub idle_timeout: Duration,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            idle_timeout: Duration::from_secs(DEFAULT_IDLE_TIMEOUT_SECS),
        }
    }
}

impl HttpServerConfig {
    pub(crate) fn from_lookup(lookup: &Lookup<'_>) -> Result<Self, ConfigError> {
        Ok(Self {
            address: lookup("HTTP_ADDRESS").unwrap_or_else(|| DEFAULT_ADDRESS.to_string()),
            timeout: Duration::from_secs(parse_secs(
                lookup,
                "HTTP_TIMEOUT_SECS",
                DEFAULT_TIMEOUT_SECS,
            )?),
            idle_timeout: Duration::from_secs(parse_secs(
                lookup,
                "HTTP_IDLE_TIMEOUT_SECS",
                DEFAULT_IDLE_TIMEOUT_SECS,
            )?),
        })
    }
}

fn parse_secs(lookup: &Lookup<'_>, key: &str, default: u64) -> Result<u64, ConfigError> {
    match lookup(key) {
        None => Ok(default),
        Some(value) => {
            value
                .trim()
                .parse::<u64>()
                .map_err(|e| ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: value.clone(),
                    reason: e.to_string(),
                })
        }
    }
}
