//! Report rendering
//!
//! A [`ScrapeResult`] renders to pretty JSON, a Markdown report and CSV
//! tables. The JSON form parses back with [`from_json`].

pub mod csv;
pub mod markdown;

pub use csv::{threads_to_csv, to_csv};
pub use markdown::{to_markdown, MarkdownRenderer};

use crate::error::Result;
use crate::models::ScrapeResult;

/// Pretty-printed JSON with camelCase keys; absent optionals are `null`
///
/// # Errors
///
/// Returns an error if serialization fails
pub fn to_json(result: &ScrapeResult) -> Result<String> {
    Ok(serde_json::to_string_pretty(result)?)
}

/// Parse JSON produced by [`to_json`]
///
/// # Errors
///
/// Returns an error if `text` is not a serialized `ScrapeResult`
pub fn from_json(text: &str) -> Result<ScrapeResult> {
    Ok(serde_json::from_str(text)?)
}
