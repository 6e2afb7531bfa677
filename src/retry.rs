//! Retry policy for slick requests.

use reqwest::StatusCode;

/// Default number of attempts per request.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Which failed responses are worth another attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RetryOn {
    /// Every non-200 response and every transport error.
    #[default]
    AnyFailure,
    /// Transport errors, 5xx, 408 and 429; other 4xx fail immediately.
    ServerErrors,
}

/// How many times to try a request and which failures to retry.
///
/// There is no delay between attempts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub retry_on: RetryOn,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            retry_on: RetryOn::AnyFailure,
        }
    }
}

impl RetryPolicy {
    /// A policy that tries each request once.
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_retry_on(mut self, retry_on: RetryOn) -> Self {
        self.retry_on = retry_on;
        self
    }

    /// Attempts actually made; never less than one.
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Whether a response with this (non-200) status may be retried.
    pub fn should_retry(&self, status: StatusCode) -> bool {
        match self.retry_on {
            RetryOn::AnyFailure => true,
            RetryOn::ServerErrors => {
                status.is_server_error()
                    || status == StatusCode::REQUEST_TIMEOUT
                    || status == StatusCode::TOO_MANY_REQUESTS
                    || !status.is_client_error()
            }
        }
    }
}
