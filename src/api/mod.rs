//! Notebook collection through the Kaggle API
//!
//! The collector depends on the [`NotebookApi`] capability rather than on the
//! live client, so tests can substitute a double.

pub mod client;
pub mod credentials;

pub use client::KaggleApiClient;
pub use credentials::Credentials;

use async_trait::async_trait;

use crate::models::Notebook;
use crate::utils::error::NotebookError;

/// Capability to list a competition's notebooks
#[async_trait]
pub trait NotebookApi: Send + Sync {
    /// Check that usable credentials are available
    async fn authenticate(&self) -> Result<(), NotebookError>;

    /// List up to `limit` notebooks in API order
    async fn list_notebooks(
        &self,
        competition_id: &str,
        limit: usize,
    ) -> Result<Vec<Notebook>, NotebookError>;
}

/// Collects notebooks through a [`NotebookApi`]
pub struct NotebookCollector<'a> {
    api: &'a dyn NotebookApi,
}

impl<'a> NotebookCollector<'a> {
    #[must_use]
    pub fn new(api: &'a dyn NotebookApi) -> Self {
        Self { api }
    }

    /// Collect up to `max_notebooks` notebooks, keeping API order
    ///
    /// # Errors
    ///
    /// Returns `NotebookError::Authentication` if credentials are missing or
    /// rejected and `NotebookError::Api` for other client failures
    pub async fn collect(
        &self,
        competition_id: &str,
        max_notebooks: usize,
    ) -> Result<Vec<Notebook>, NotebookError> {
        self.api.authenticate().await?;

        let mut notebooks = self.api.list_notebooks(competition_id, max_notebooks).await?;
        notebooks.truncate(max_notebooks);

        tracing::info!(
            competition = competition_id,
            notebooks = notebooks.len(),
            "Completed notebook collection"
        );

        Ok(notebooks)
    }
}
