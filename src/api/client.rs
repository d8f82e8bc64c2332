//! Kaggle REST API client for notebook listings
//!
//! Calls `GET {api_base}/kernels/list?competition=..&page=..&pageSize=..`
//! with HTTP basic auth and pages until the requested number of notebooks is
//! reached or the API returns a short page.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use crate::api::credentials::Credentials;
use crate::api::NotebookApi;
use crate::config::Config;
use crate::crawler::headers::build_api_headers;
use crate::crawler::url::notebook_url;
use crate::models::Notebook;
use crate::utils::error::NotebookError;

/// Largest page size the kernels endpoint accepts
pub const MAX_PAGE_SIZE: usize = 50;

/// Kernel entry as returned by the API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiKernel {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    author: String,
    #[serde(default)]
    total_votes: i64,
    #[serde(default)]
    language: Option<String>,
    #[serde(default)]
    last_run_time: Option<String>,
}

/// Live Kaggle API client
pub struct KaggleApiClient {
    client: Client,
    api_base_url: String,
    site_base_url: String,
    credentials: Option<Credentials>,
    delay: Duration,
}

impl KaggleApiClient {
    /// Create a client from configuration
    ///
    /// `credentials` may be `None`; every call then fails with
    /// `NotebookError::Authentication`.
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::Api` if the HTTP client cannot be created
    pub fn new(config: &Config, credentials: Option<Credentials>) -> Result<Self, NotebookError> {
        let client = Client::builder()
            .default_headers(build_api_headers(&config.scraper.user_agent))
            .timeout(config.request_timeout())
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            api_base_url: config.scraper.api_base_url.trim_end_matches('/').to_string(),
            site_base_url: config.scraper.base_url.trim_end_matches('/').to_string(),
            credentials,
            delay: config.request_delay(),
        })
    }

    fn credentials(&self) -> Result<&Credentials, NotebookError> {
        self.credentials
            .as_ref()
            .filter(|c| c.is_complete())
            .ok_or_else(|| {
                NotebookError::Authentication("no Kaggle API credentials configured".to_string())
            })
    }

    async fn fetch_page(
        &self,
        competition_id: &str,
        page: usize,
        page_size: usize,
    ) -> Result<Vec<Notebook>, NotebookError> {
        let credentials = self.credentials()?;
        let url = format!("{}/kernels/list", self.api_base_url);

        tracing::debug!(competition = competition_id, page, page_size, "Listing notebooks");

        let response = self
            .client
            .get(&url)
            .basic_auth(&credentials.username, Some(&credentials.key))
            .query(&[
                ("competition", competition_id.to_string()),
                ("page", page.to_string()),
                ("pageSize", page_size.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(NotebookError::Authentication(format!(
                "Kaggle API rejected credentials for {} (HTTP {})",
                credentials.username,
                status.as_u16()
            )));
        }
        if !status.is_success() {
            return Err(NotebookError::Api(format!(
                "kernels/list returned HTTP {}",
                status.as_u16()
            )));
        }

        let kernels: Vec<ApiKernel> = response
            .json()
            .await
            .map_err(|e| NotebookError::Api(format!("invalid kernels/list response: {e}")))?;

        Ok(kernels
            .into_iter()
            .map(|kernel| self.to_notebook(kernel))
            .collect())
    }

    fn to_notebook(&self, kernel: ApiKernel) -> Notebook {
        Notebook {
            url: notebook_url(&self.site_base_url, &kernel.reference),
            id: kernel.reference,
            title: kernel.title,
            author: kernel.author,
            votes: kernel.total_votes,
            language: kernel.language,
            last_run_time: kernel.last_run_time,
        }
    }
}

#[async_trait]
impl NotebookApi for KaggleApiClient {
    async fn authenticate(&self) -> Result<(), NotebookError> {
        self.credentials().map(|_| ())
    }

    async fn list_notebooks(
        &self,
        competition_id: &str,
        limit: usize,
    ) -> Result<Vec<Notebook>, NotebookError> {
        let page_size = limit.clamp(1, MAX_PAGE_SIZE);
        let mut notebooks = Vec::new();
        let mut page = 1;

        while notebooks.len() < limit {
            if page > 1 && !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }

            let batch = self.fetch_page(competition_id, page, page_size).await?;
            let received = batch.len();
            notebooks.extend(batch);

            if received < page_size {
                break;
            }
            page += 1;
        }

        notebooks.truncate(limit);
        Ok(notebooks)
    }
}
