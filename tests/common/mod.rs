//! Common test utilities

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use kaggle_harvest::api::NotebookApi;
use kaggle_harvest::config::Config;
use kaggle_harvest::models::Notebook;
use kaggle_harvest::utils::error::NotebookError;

pub const SLUG: &str = "titanic";

/// Config pointing both page and API traffic at a mock server
pub fn test_config(server_uri: &str) -> Config {
    let mut config = Config::default();
    config.scraper.base_url = server_uri.to_string();
    config.scraper.api_base_url = format!("{server_uri}/api/v1");
    config.scraper.request_delay_secs = 0.0;
    config.scraper.request_timeout_secs = 5;
    config
}

pub fn overview_html() -> String {
    r#"<!DOCTYPE html>
<html>
<head>
  <title>Titanic - Machine Learning from Disaster | Kaggle</title>
  <meta property="og:title" content="Titanic - Machine Learning from Disaster">
  <meta name="description" content="Start here! Predict survival on the Titanic and get familiar with ML basics">
</head>
<body>
<div id="site-content">
  <div data-testid="competition-evaluation">Your score is the percentage of passengers you correctly predict.</div>
  <div data-testid="competition-reward">Knowledge</div>
  <ul data-testid="competition-timeline">
    <li><span data-testid="milestone-name">Start Date</span> <time datetime="2012-09-28">Sep 28, 2012</time></li>
    <li><span data-testid="milestone-name">Final Submission Deadline</span> <time datetime="2030-01-07">Jan 7, 2030</time></li>
  </ul>
</div>
</body>
</html>"#
        .to_string()
}

/// Listing page with one item per `(id, title, author)`
pub fn listing_html(threads: &[(&str, &str, &str)]) -> String {
    let items: String = threads
        .iter()
        .enumerate()
        .map(|(i, (id, title, author))| {
            format!(
                r#"<li data-testid="discussion-list-item">
    <a data-testid="topic-title" href="/competitions/titanic/discussion/{id}">{title}</a>
    <span data-testid="author-name">{author}</span>
    <span data-testid="reply-count">{i} replies</span>
    <span data-testid="vote-count">{votes}</span>
</li>"#,
                votes = 10 * (i + 1)
            )
        })
        .collect();

    format!("<html><body><ul>{items}</ul></body></html>")
}

/// Thread page with one post per `(author, body)`
pub fn thread_html(posts: &[(&str, &str)]) -> String {
    let items: String = posts
        .iter()
        .map(|(author, body)| {
            format!(
                r#"<div data-testid="discussion-post">
    <span data-testid="author-name">{author}</span>
    <time datetime="2024-03-04T10:22:03Z">4 Mar 2024</time>
    <div data-testid="post-body"><p>{body}</p></div>
</div>"#
            )
        })
        .collect();

    format!("<html><body>{items}</body></html>")
}

pub fn notebook(i: usize) -> Notebook {
    Notebook {
        id: format!("user{i}/notebook-{i}"),
        title: format!("Notebook {i}"),
        author: format!("user{i}"),
        votes: 100 - i as i64,
        url: format!("https://www.kaggle.com/code/user{i}/notebook-{i}"),
        language: Some("python".to_string()),
        last_run_time: None,
    }
}

/// In-memory notebook source
pub struct FakeNotebookApi {
    pub authenticated: bool,
    pub notebooks: Vec<Notebook>,
    /// Shared so tests can read it after the fake is boxed
    pub list_calls: Arc<AtomicUsize>,
}

impl FakeNotebookApi {
    pub fn with_notebooks(count: usize) -> Self {
        Self {
            authenticated: true,
            notebooks: (0..count).map(notebook).collect(),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn unauthenticated() -> Self {
        Self {
            authenticated: false,
            notebooks: Vec::new(),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl NotebookApi for FakeNotebookApi {
    async fn authenticate(&self) -> Result<(), NotebookError> {
        if self.authenticated {
            Ok(())
        } else {
            Err(NotebookError::Authentication("no credentials".to_string()))
        }
    }

    async fn list_notebooks(
        &self,
        _competition_id: &str,
        limit: usize,
    ) -> Result<Vec<Notebook>, NotebookError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.notebooks.iter().take(limit).cloned().collect())
    }
}
