//! Unified error handling for the kaggle-harvest crate
//!
//! This module provides a unified error type that consolidates the per-stage
//! errors into a single `Error` enum, while keeping the stage errors available
//! for callers that need to match on them.
//!
//! # Architecture
//!
//! - [`HarvestErrorTrait`] - Common interface implemented by all error types
//! - [`ErrorCategory`] - Classification of errors for handling strategies
//! - [`Error`] - Unified error enum wrapping all stage errors

use thiserror::Error;

pub use crate::utils::error::{ExtractionError, FetchError, NotebookError, ScrapeError};

/// Common trait for kaggle-harvest error types
pub trait HarvestErrorTrait: std::error::Error {
    /// Check if retrying the same call later could succeed
    fn is_recoverable(&self) -> bool;

    /// Get the error category for handling strategies
    fn category(&self) -> ErrorCategory;
}

/// Classification of errors for handling strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Network-related errors (transport, HTTP status, timeout)
    Network,
    /// Page structure and data extraction errors
    Parsing,
    /// Credential errors
    Auth,
    /// Notebook API errors
    Api,
    /// Template and serialization errors
    Render,
}

impl ErrorCategory {
    /// Short human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Network => "network error",
            Self::Parsing => "parsing error",
            Self::Auth => "authentication error",
            Self::Api => "API error",
            Self::Render => "render error",
        }
    }
}

impl HarvestErrorTrait for FetchError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Network(_) | Self::Timeout { .. } => true,
            Self::Http { status, .. } => matches!(status, 429 | 500 | 502 | 503 | 504),
            Self::InvalidUrl(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Network
    }
}

impl HarvestErrorTrait for ExtractionError {
    fn is_recoverable(&self) -> bool {
        false
    }

    fn category(&self) -> ErrorCategory {
        ErrorCategory::Parsing
    }
}

impl HarvestErrorTrait for NotebookError {
    fn is_recoverable(&self) -> bool {
        matches!(self, Self::Api(_))
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Authentication(_) => ErrorCategory::Auth,
            Self::Api(_) => ErrorCategory::Api,
        }
    }
}

impl HarvestErrorTrait for ScrapeError {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(e) => e.is_recoverable(),
            Self::Extraction(e) => e.is_recoverable(),
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Fetch(e) => e.category(),
            Self::Extraction(e) => e.category(),
        }
    }
}

/// Unified error type for the kaggle-harvest crate
#[derive(Error, Debug)]
pub enum Error {
    /// Fatal scrape failure
    #[error("Scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// Fetch-specific errors
    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    /// Extraction-specific errors
    #[error("Extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Notebook API errors
    #[error("Notebook error: {0}")]
    Notebook(#[from] NotebookError),

    /// Template rendering errors
    #[error("Render error: {0}")]
    Render(#[from] handlebars::RenderError),

    /// Template registration errors
    #[error("Template error: {0}")]
    Template(#[from] Box<handlebars::TemplateError>),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HarvestErrorTrait for Error {
    fn is_recoverable(&self) -> bool {
        match self {
            Self::Scrape(e) => e.is_recoverable(),
            Self::Fetch(e) => e.is_recoverable(),
            Self::Extraction(e) => e.is_recoverable(),
            Self::Notebook(e) => e.is_recoverable(),
            Self::Render(_) | Self::Template(_) | Self::Json(_) => false,
        }
    }

    fn category(&self) -> ErrorCategory {
        match self {
            Self::Scrape(e) => e.category(),
            Self::Fetch(e) => e.category(),
            Self::Extraction(e) => e.category(),
            Self::Notebook(e) => e.category(),
            Self::Render(_) | Self::Template(_) | Self::Json(_) => ErrorCategory::Render,
        }
    }
}

impl From<handlebars::TemplateError> for Error {
    fn from(err: handlebars::TemplateError) -> Self {
        Self::Template(Box::new(err))
    }
}

/// Result type alias using the unified Error type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_category() {
        let fetch_err = Error::Fetch(FetchError::Timeout {
            url: "https://www.kaggle.com".to_string(),
        });
        assert_eq!(fetch_err.category(), ErrorCategory::Network);

        let parse_err = Error::Extraction(ExtractionError::UnrecognizedStructure(
            "no markers".to_string(),
        ));
        assert_eq!(parse_err.category(), ErrorCategory::Parsing);

        let auth_err = Error::Notebook(NotebookError::Authentication("missing".to_string()));
        assert_eq!(auth_err.category(), ErrorCategory::Auth);
    }

    #[test]
    fn test_is_recoverable() {
        let timeout = Error::Fetch(FetchError::Timeout {
            url: "https://www.kaggle.com".to_string(),
        });
        assert!(timeout.is_recoverable());

        let not_found = FetchError::Http {
            status: 404,
            url: "https://www.kaggle.com/competitions/x".to_string(),
        };
        assert!(!not_found.is_recoverable());

        let throttled = FetchError::Http {
            status: 429,
            url: "https://www.kaggle.com/competitions/x".to_string(),
        };
        assert!(throttled.is_recoverable());
    }

    #[test]
    fn test_scrape_error_delegates_category() {
        let err = ScrapeError::Extraction(ExtractionError::InvalidCompetitionUrl(
            "https://example.com".to_string(),
        ));
        assert_eq!(err.category(), ErrorCategory::Parsing);
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_render_error_category() {
        let err = Error::from(serde_json::from_str::<u32>("not json").unwrap_err());
        assert_eq!(err.category(), ErrorCategory::Render);
        assert!(!err.is_recoverable());
        assert_eq!(ErrorCategory::Render.label(), "render error");
    }
}
