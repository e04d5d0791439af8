//! Service configuration
//!
//! Values come from the deployment secret store (or any key lookup) with
//! defaults for everything.

use std::time::Duration;

use anyhow::{Context, Result};

pub const REQUEST_TIMEOUT_SECS: &str = "REQUEST_TIMEOUT_SECS";
pub const CORS_PERMISSIVE: &str = "CORS_PERMISSIVE";

const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

/// Runtime configuration shared by both services
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Upper bound for a single request, store calls included
    pub request_timeout: Duration,
    /// Whether to answer CORS preflights for any origin
    pub cors_permissive: bool,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            cors_permissive: true,
        }
    }
}

impl ServiceConfig {
    /// Load config through a key lookup, e.g. `|k| secrets.get(k)`
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(REQUEST_TIMEOUT_SECS) {
            let secs: u64 = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be a whole number of seconds", REQUEST_TIMEOUT_SECS))?;
            anyhow::ensure!(secs > 0, "{} must be greater than zero", REQUEST_TIMEOUT_SECS);
            config.request_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(CORS_PERMISSIVE) {
            config.cors_permissive = raw
                .trim()
                .parse()
                .with_context(|| format!("{} must be true or false", CORS_PERMISSIVE))?;
        }

        Ok(config)
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}
