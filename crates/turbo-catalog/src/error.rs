//! Catalog fetch error types.

use thiserror::Error;

/// Errors that can occur when talking to the catalog service.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// HTTP error response.
    #[error("HTTP error: {status} for {url}")]
    Http { status: u16, url: String },

    /// Request exceeded its time budget.
    #[error("Timeout after {0}ms")]
    Timeout(u64),

    /// Could not reach the service.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Response body did not match the expected shape.
    #[error("Deserialization error: {0}")]
    Deserialization(String),

    /// Malformed base URL or path.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// Any other transport failure.
    #[error("Request error: {0}")]
    Request(String),
}

impl FetchError {
    /// HTTP status code, if the service answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(e: serde_json::Error) -> Self {
        FetchError::Deserialization(e.to_string())
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(e: reqwest::Error) -> Self {
        let url = e.url().map(|u| u.to_string()).unwrap_or_default();
        if let Some(status) = e.status() {
            FetchError::Http {
                status: status.as_u16(),
                url,
            }
        } else if e.is_timeout() {
            FetchError::Timeout(0)
        } else if e.is_connect() {
            FetchError::Connection(e.to_string())
        } else if e.is_decode() {
            FetchError::Deserialization(e.to_string())
        } else if e.is_builder() {
            FetchError::InvalidUrl(e.to_string())
        } else {
            FetchError::Request(e.to_string())
        }
    }
}
