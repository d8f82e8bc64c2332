//! Competition scrape pipeline
//!
//! Runs the three collection stages in order on one fetcher:
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │  Overview   │────▶│ Discussions │────▶│  Notebooks  │────▶ ScrapeResult
//! │  (fatal)    │     │   (soft)    │     │   (soft)    │
//! └─────────────┘     └─────────────┘     └─────────────┘
//! ```
//!
//! # Example
//!
//! ```no_run
//! use kaggle_harvest::config::Config;
//! use kaggle_harvest::crawler::pipeline::CompetitionScraper;
//!
//! # async fn example() -> kaggle_harvest::error::Result<()> {
//! let scraper = CompetitionScraper::new(Config::default())?;
//! let result = scraper
//!     .scrape_all_competition_data("https://www.kaggle.com/competitions/titanic")
//!     .await?;
//!
//! println!("{} threads", result.discussion_threads.len());
//! # Ok(())
//! # }
//! ```

use std::time::Instant;

use crate::api::{Credentials, KaggleApiClient, NotebookApi, NotebookCollector};
use crate::config::Config;
use crate::crawler::discussion::DiscussionCollector;
use crate::crawler::fetcher::KaggleFetcher;
use crate::crawler::url::{extract_competition_slug, overview_path};
use crate::error::HarvestErrorTrait;
use crate::models::{CollectLimits, Competition, ScrapeResult};
use crate::parser::OverviewParser;
use crate::utils::error::{NotebookError, ScrapeError};

/// Scrapes one competition end to end
pub struct CompetitionScraper {
    limits: CollectLimits,
    fetcher: KaggleFetcher,
    overview: OverviewParser,
    notebook_api: Box<dyn NotebookApi>,
}

impl CompetitionScraper {
    /// Create a scraper with the live notebook client
    ///
    /// Credentials are discovered here. If none are found the scraper is
    /// still built and the notebook stage yields an empty list.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP clients cannot be created
    pub fn new(config: Config) -> crate::error::Result<Self> {
        let credentials = match Credentials::discover() {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                tracing::debug!(error = %e, "No Kaggle credentials found");
                None
            }
        };

        let api = KaggleApiClient::new(&config, credentials)?;
        Self::with_notebook_api(config, Box::new(api))
    }

    /// Create a scraper with a caller-supplied notebook capability
    ///
    /// # Errors
    ///
    /// Returns an error if the page fetcher cannot be created
    pub fn with_notebook_api(
        config: Config,
        notebook_api: Box<dyn NotebookApi>,
    ) -> crate::error::Result<Self> {
        let fetcher = KaggleFetcher::new(&config)?;

        Ok(Self {
            limits: CollectLimits::from(&config.scraper),
            fetcher,
            overview: OverviewParser::new(),
            notebook_api,
        })
    }

    /// Scrape overview, discussions and notebooks for `url`
    ///
    /// # Errors
    ///
    /// Returns `ScrapeError` if the URL names no competition or the overview
    /// page cannot be fetched or recognized. Discussion and notebook
    /// failures are logged and produce empty sequences.
    pub async fn scrape_all_competition_data(
        &self,
        url: &str,
    ) -> Result<ScrapeResult, ScrapeError> {
        let started = Instant::now();
        let slug = extract_competition_slug(url)?;

        tracing::info!(competition = %slug, url, "Starting competition scrape");

        let competition = self.scrape_overview(&slug).await?;

        let discussion_threads = match DiscussionCollector::new(&self.fetcher)
            .collect(
                &slug,
                self.limits.max_threads,
                self.limits.max_posts_per_thread,
            )
            .await
        {
            Ok(threads) => threads,
            Err(e) => {
                tracing::warn!(
                    competition = %slug,
                    error = %e,
                    category = e.category().label(),
                    recoverable = e.is_recoverable(),
                    "Discussion collection failed, continuing without threads"
                );
                Vec::new()
            }
        };

        let notebooks = match NotebookCollector::new(self.notebook_api.as_ref())
            .collect(&slug, self.limits.max_notebooks)
            .await
        {
            Ok(notebooks) => notebooks,
            Err(e @ NotebookError::Authentication(_)) => {
                tracing::warn!(
                    competition = %slug,
                    error = %e,
                    "Kaggle API authentication failed, continuing without notebooks"
                );
                Vec::new()
            }
            Err(e) => {
                tracing::warn!(
                    competition = %slug,
                    error = %e,
                    "Notebook collection failed, continuing without notebooks"
                );
                Vec::new()
            }
        };

        let result = ScrapeResult::new(competition, discussion_threads, notebooks);

        tracing::info!(
            competition = %slug,
            threads = result.discussion_threads.len(),
            posts = result.post_count(),
            notebooks = result.notebooks.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Competition scrape complete"
        );

        Ok(result)
    }

    async fn scrape_overview(&self, slug: &str) -> Result<Competition, ScrapeError> {
        let page_url = self.fetcher.resolve(&overview_path(slug));
        let html = self.fetcher.fetch(&page_url, None).await?;
        let competition = self.overview.extract(&html, slug, &page_url)?;

        tracing::debug!(
            competition = slug,
            title = %competition.title,
            milestones = competition.timeline.len(),
            "Extracted overview"
        );

        Ok(competition)
    }
}

/// Scrape a competition with the live notebook client
///
/// # Errors
///
/// Returns an error if the clients cannot be built or the overview stage fails
pub async fn scrape_all_competition_data(
    url: &str,
    config: &Config,
) -> crate::error::Result<ScrapeResult> {
    let scraper = CompetitionScraper::new(config.clone())?;
    Ok(scraper.scrape_all_competition_data(url).await?)
}
