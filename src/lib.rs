//! kaggle-harvest - Kaggle competition scraper
//!
//! Collects a competition's overview, discussion threads and notebooks and
//! renders them as JSON, Markdown and CSV.
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - [`config`] - Configuration management and settings
//! - [`crawler`] - Page fetching, discussion collection and the scrape pipeline
//! - [`parser`] - HTML parsing and data extraction
//! - [`api`] - Kaggle API credentials and notebook listing
//! - [`models`] - Core data structures and types
//! - [`render`] - JSON, Markdown and CSV rendering
//! - [`storage`] - Report file output
//! - [`utils`] - Common utilities and helpers
//!
//! # Example
//!
//! ```no_run
//! use kaggle_harvest::config::Config;
//! use kaggle_harvest::crawler::CompetitionScraper;
//! use kaggle_harvest::render;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let scraper = CompetitionScraper::new(config)?;
//!     let result = scraper
//!         .scrape_all_competition_data("https://www.kaggle.com/competitions/titanic")
//!         .await?;
//!     println!("{}", render::to_markdown(&result)?);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod crawler;
pub mod error;
pub mod models;
pub mod parser;
pub mod render;
pub mod storage;
pub mod utils;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::api::{Credentials, KaggleApiClient, NotebookApi};
    pub use crate::config::Config;
    pub use crate::crawler::{CompetitionScraper, KaggleFetcher};
    pub use crate::error::{Error, ErrorCategory, HarvestErrorTrait, Result};
    pub use crate::models::{Competition, DiscussionThread, Notebook, Post, ScrapeResult};
    pub use crate::storage::ReportWriter;
}

// Direct re-exports for convenience
pub use crawler::scrape_all_competition_data;
pub use models::{Competition, DiscussionThread, Notebook, Post, ScrapeResult};
