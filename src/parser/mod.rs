//! HTML parsing and data extraction
//!
//! This module turns Kaggle competition, discussion listing and thread pages
//! into the records defined in [`crate::models`].

pub mod discussion;
pub mod overview;
pub mod sanitize;
pub mod selectors;

// Re-export main parsers and public types
pub use discussion::{parse_timestamp, DiscussionParser, ThreadSummary};
pub use overview::OverviewParser;
pub use selectors::{FieldSelector, Source};
