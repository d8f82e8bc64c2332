//! Discussion thread collector
//!
//! Fetches the competition's discussion listing, then each listed thread in
//! listing order. Requests are strictly sequential and spaced by the
//! fetcher's delay.

use crate::crawler::fetcher::KaggleFetcher;
use crate::crawler::headers::build_referer_headers;
use crate::crawler::url::discussion_list_path;
use crate::models::DiscussionThread;
use crate::parser::DiscussionParser;
use crate::utils::error::FetchError;

/// Collects discussion threads and their posts
pub struct DiscussionCollector<'a> {
    fetcher: &'a KaggleFetcher,
    parser: DiscussionParser,
}

impl<'a> DiscussionCollector<'a> {
    /// Create a collector borrowing the scrape's fetcher
    #[must_use]
    pub fn new(fetcher: &'a KaggleFetcher) -> Self {
        Self {
            fetcher,
            parser: DiscussionParser::new(),
        }
    }

    /// Collect up to `max_threads` threads with up to `max_posts_per_thread` posts each
    ///
    /// A thread whose page cannot be fetched is kept with an empty post list
    /// and collection continues with the next thread.
    ///
    /// # Errors
    ///
    /// Returns `FetchError` only if the listing page itself cannot be fetched
    pub async fn collect(
        &self,
        competition_id: &str,
        max_threads: usize,
        max_posts_per_thread: usize,
    ) -> Result<Vec<DiscussionThread>, FetchError> {
        let listing_url = self.fetcher.resolve(&discussion_list_path(competition_id));
        let html = self.fetcher.fetch(&listing_url, None).await?;

        let summaries = self.parser.parse_listing(
            &html,
            self.fetcher.base_url(),
            competition_id,
            max_threads,
        );

        tracing::info!(
            competition = competition_id,
            threads = summaries.len(),
            "Collecting discussion threads"
        );

        let mut threads = Vec::with_capacity(summaries.len());
        let mut failed = 0usize;

        for (i, summary) in summaries.into_iter().enumerate() {
            tracing::debug!(
                index = i + 1,
                thread_id = %summary.id,
                title = %summary.title,
                "Fetching thread"
            );

            let headers = build_referer_headers(&listing_url);
            let posts = match self.fetcher.fetch(&summary.url, Some(headers)).await {
                Ok(page) => self.parser.parse_posts(&page, max_posts_per_thread),
                Err(e) => {
                    tracing::warn!(
                        thread_id = %summary.id,
                        url = %summary.url,
                        error = %e,
                        "Failed to fetch thread, keeping it without posts"
                    );
                    failed += 1;
                    Vec::new()
                }
            };

            threads.push(summary.into_thread(posts));
        }

        tracing::info!(
            competition = competition_id,
            threads = threads.len(),
            failed,
            "Completed discussion collection"
        );

        Ok(threads)
    }
}
