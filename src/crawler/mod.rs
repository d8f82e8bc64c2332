//! Page fetching and collection stages
//!
//! All requests for one scrape go through a single [`KaggleFetcher`], which
//! spaces consecutive requests by the configured delay.

pub mod discussion;
pub mod fetcher;
pub mod headers;
pub mod pipeline;
pub mod url;

pub use discussion::DiscussionCollector;
pub use fetcher::KaggleFetcher;
pub use pipeline::{scrape_all_competition_data, CompetitionScraper};
pub use url::extract_competition_slug;
