//! Connection configuration.

use std::env;
use std::time::Duration;

use crate::error::{Result, SlickError};
use crate::retry::{RetryOn, RetryPolicy};

const ENV_URL: &str = "SLICK_URL";
const ENV_RETRY_ATTEMPTS: &str = "SLICK_RETRY_ATTEMPTS";
const ENV_RETRY_CLIENT_ERRORS: &str = "SLICK_RETRY_CLIENT_ERRORS";
const ENV_TIMEOUT_SECS: &str = "SLICK_TIMEOUT_SECS";

/// Settings for a [`SlickConnection`](crate::SlickConnection).
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use slickqa::{RetryOn, SlickConfig};
///
/// let config = SlickConfig::new("http://localhost:8080")
///     .max_attempts(5)
///     .retry_on(RetryOn::ServerErrors)
///     .timeout(Duration::from_secs(30));
/// assert_eq!(config.retry.max_attempts, 5);
/// ```
#[derive(Debug, Clone)]
pub struct SlickConfig {
    /// Server URL, with or without the trailing `/api`.
    pub base_url: String,
    pub retry: RetryPolicy,
    /// Per-request timeout. `None` waits indefinitely.
    pub timeout: Option<Duration>,
}

impl SlickConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            retry: RetryPolicy::default(),
            timeout: None,
        }
    }

    /// Read configuration from environment variables.
    ///
    /// - `SLICK_URL` (required) - server base URL
    /// - `SLICK_RETRY_ATTEMPTS` (optional) - attempts per request, default 3
    /// - `SLICK_RETRY_CLIENT_ERRORS` (optional) - `false` stops retrying on 4xx
    /// - `SLICK_TIMEOUT_SECS` (optional) - per-request timeout
    ///
    /// # Errors
    ///
    /// Returns an error if `SLICK_URL` is not set or a numeric/boolean
    /// variable can't be parsed.
    pub fn from_env() -> Result<Self> {
        let base_url = env::var(ENV_URL).map_err(|_| {
            SlickError::ConfigMissing(format!("{ENV_URL} environment variable not set"))
        })?;
        Self::from_lookup(base_url, |key| env::var(key).ok())
    }

    fn from_lookup<F>(base_url: String, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::new(base_url);

        if let Some(raw) = lookup(ENV_RETRY_ATTEMPTS) {
            let attempts: u32 = raw.trim().parse().map_err(|_| {
                SlickError::ConfigMissing(format!("{ENV_RETRY_ATTEMPTS} must be a number, got '{raw}'"))
            })?;
            config = config.max_attempts(attempts);
        }

        if let Some(raw) = lookup(ENV_RETRY_CLIENT_ERRORS) {
            let retry_client_errors: bool = raw.trim().to_lowercase().parse().map_err(|_| {
                SlickError::ConfigMissing(format!(
                    "{ENV_RETRY_CLIENT_ERRORS} must be true or false, got '{raw}'"
                ))
            })?;
            if !retry_client_errors {
                config = config.retry_on(RetryOn::ServerErrors);
            }
        }

        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            let secs: u64 = raw.trim().parse().map_err(|_| {
                SlickError::ConfigMissing(format!("{ENV_TIMEOUT_SECS} must be a number, got '{raw}'"))
            })?;
            config = config.timeout(Duration::from_secs(secs));
        }

        Ok(config)
    }

    pub fn max_attempts(mut self, attempts: u32) -> Self {
        self.retry = self.retry.with_max_attempts(attempts);
        self
    }

    pub fn retry_on(mut self, retry_on: RetryOn) -> Self {
        self.retry = self.retry.with_retry_on(retry_on);
        self
    }

    pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }
}
