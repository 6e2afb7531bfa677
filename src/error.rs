//! Error types for Slick API operations.

use thiserror::Error;

/// Errors that can occur during Slick API operations.
#[derive(Debug, Error)]
pub enum SlickError {
    /// Configuration is missing or incomplete.
    #[error("Slick configuration required: {0}")]
    ConfigMissing(String),

    /// The base URL handed to a connection was empty or unusable.
    #[error("Invalid Slick base URL '{0}'")]
    InvalidBaseUrl(String),

    /// An operation needed an identifier that was not set.
    #[error("{0} has no id; it must be saved to slick first")]
    MissingId(&'static str),

    /// Every attempt to talk to slick failed.
    #[error("{message} (url: {url}, attempts: {attempts}, last status: {status_code:?})")]
    Communication {
        message: String,
        url: String,
        attempts: u32,
        status_code: Option<u16>,
        body: Option<String>,
    },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// JSON parsing or field coercion error.
    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    UrlError(#[from] url::ParseError),

    /// Local file access failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl SlickError {
    /// Status code of the last response seen before giving up, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SlickError::Communication { status_code, .. } => *status_code,
            SlickError::HttpError(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Result type alias for Slick operations.
pub type Result<T> = core::result::Result<T, SlickError>;
