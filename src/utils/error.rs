//! Error types for the kaggle-harvest scraper
//!
//! This module defines the per-stage error types used throughout the pipeline.

use thiserror::Error;

/// Errors that can occur during HTTP fetching operations
#[derive(Error, Debug)]
pub enum FetchError {
    /// Transport-level failure (DNS, connection refused, reset)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Request exceeded the configured timeout
    #[error("Request timeout: {url}")]
    Timeout { url: String },

    /// Non-success status code
    #[error("HTTP {status} for {url}")]
    Http { status: u16, url: String },

    /// Invalid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),
}

impl FetchError {
    /// Map a reqwest error, separating timeouts from other transport errors
    pub fn from_transport(err: reqwest::Error, url: &str) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                url: url.to_string(),
            }
        } else {
            Self::Network(err)
        }
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Errors raised when page structure cannot be interpreted
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// None of the known top-level markers were present
    #[error("Unrecognized page structure: {0}")]
    UnrecognizedStructure(String),

    /// URL does not name a competition
    #[error("Could not extract competition slug from URL: {0}")]
    InvalidCompetitionUrl(String),
}

/// Errors from the notebook API client
#[derive(Error, Debug)]
pub enum NotebookError {
    /// Credentials missing or rejected
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Any other client failure
    #[error("Notebook API error: {0}")]
    Api(String),
}

impl From<reqwest::Error> for NotebookError {
    fn from(err: reqwest::Error) -> Self {
        match err.status().map(|s| s.as_u16()) {
            Some(401 | 403) => Self::Authentication(err.to_string()),
            _ => Self::Api(err.to_string()),
        }
    }
}

/// Fatal failure of the mandatory overview stage
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// Overview page could not be fetched
    #[error("Failed to fetch competition overview: {0}")]
    Fetch(#[from] FetchError),

    /// Overview page could not be interpreted
    #[error("Failed to extract competition overview: {0}")]
    Extraction(#[from] ExtractionError),
}
