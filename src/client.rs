//! Slick HTTP client.
//!
//! Low-level client that sends one request with the configured retry
//! policy and hands back the raw body of a successful (HTTP 200)
//! response. Mapping bodies to models happens in the API parts.

use std::fmt;

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method, StatusCode};

use crate::config::SlickConfig;
use crate::error::{Result, SlickError};
use crate::retry::RetryPolicy;

const USER_AGENT: &str = concat!("slickqa/", env!("CARGO_PKG_VERSION"));
const JSON_CONTENT: &str = "application/json";
const STREAM_CONTENT: &str = "application/octet-stream";

/// Body of an outgoing request.
#[derive(Debug, Clone)]
pub(crate) enum RequestBody {
    Empty,
    Json(String),
    Octets(Vec<u8>),
}

/// Low-level slick HTTP client.
///
/// Cheaply cloneable; clones share the same connection pool.
#[derive(Clone)]
pub struct SlickClient {
    http: Client,
    retry: RetryPolicy,
}

impl fmt::Debug for SlickClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SlickClient")
            .field("retry", &self.retry)
            .finish_non_exhaustive()
    }
}

impl SlickClient {
    /// Build a client from the HTTP-related parts of a config.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client can't be built.
    pub fn new(config: &SlickConfig) -> Result<Self> {
        let mut builder = Client::builder()
            .user_agent(USER_AGENT)
            .brotli(true)
            .gzip(true)
            .deflate(true);

        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }

        let http = builder.build().map_err(SlickError::HttpError)?;

        Ok(Self {
            http,
            retry: config.retry,
        })
    }

    pub fn retry_policy(&self) -> &RetryPolicy {
        &self.retry
    }

    /// Send a request, retrying per policy, and return the response body.
    ///
    /// Only HTTP 200 counts as success. Any other status or a transport
    /// error is logged and retried until the policy gives up, at which
    /// point the last status and body are reported in
    /// [`SlickError::Communication`].
    pub(crate) async fn send(&self, method: Method, url: &str, body: RequestBody) -> Result<String> {
        let attempts = self.retry.attempts();
        let mut last_status: Option<StatusCode> = None;
        let mut last_body: Option<String> = None;
        let mut made = 0;

        for attempt in 1..=attempts {
            made = attempt;
            tracing::debug!(%method, url, attempt, "Making request to slick");

            let response = match self.build(method.clone(), url, &body).send().await {
                Ok(response) => response,
                Err(error) => {
                    tracing::warn!(url, attempt, %error, "Received exception while connecting to slick");
                    last_status = error.status();
                    last_body = None;
                    continue;
                }
            };

            let status = response.status();
            tracing::debug!(url, status = status.as_u16(), "Request returned status code");

            if status == StatusCode::OK {
                match response.text().await {
                    Ok(text) => return Ok(text),
                    Err(error) => {
                        tracing::warn!(url, attempt, %error, "Failed reading response body from slick");
                        last_status = Some(status);
                        last_body = None;
                        continue;
                    }
                }
            }

            let text = response.text().await.ok();
            tracing::debug!(url, body = text.as_deref().unwrap_or(""), "Body of what slick returned");
            last_status = Some(status);
            last_body = text;

            if !self.retry.should_retry(status) {
                break;
            }
        }

        tracing::warn!(url, attempts = made, "Giving up on request to slick");
        Err(SlickError::Communication {
            message: format!(
                "Tried {made} times to request data from slick without a successful status code"
            ),
            url: url.to_string(),
            attempts: made,
            status_code: last_status.map(|s| s.as_u16()),
            body: last_body,
        })
    }

    fn build(&self, method: Method, url: &str, body: &RequestBody) -> reqwest::RequestBuilder {
        let request = self.http.request(method, url);
        match body {
            RequestBody::Empty => request,
            RequestBody::Json(json) => request.header(CONTENT_TYPE, JSON_CONTENT).body(json.clone()),
            RequestBody::Octets(bytes) => request
                .header(CONTENT_TYPE, STREAM_CONTENT)
                .body(bytes.clone()),
        }
    }
}
