//! HTTP page fetcher for Kaggle competition pages
//!
//! This module provides the page fetcher used by every scraping stage:
//! - Browser-like default headers
//! - Explicit inter-request delay
//! - Charset detection from the `Content-Type` header
//! - Base URL override for testing with mock servers
//!
//! There is no retry logic; callers retry manually.

use crate::config::Config;
use crate::crawler::headers::build_page_headers;
use crate::utils::error::FetchError;
use encoding_rs::{Encoding, UTF_8};
use reqwest::{header::HeaderMap, Client, Response};
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Kaggle page fetcher
///
/// One instance serves one scrape. Requests are issued one at a time and the
/// configured delay is enforced between consecutive requests.
pub struct KaggleFetcher {
    /// HTTP client with configured timeout and compression
    client: Client,

    /// Site root prepended to relative paths
    base_url: String,

    /// Minimum gap between consecutive requests
    delay: Duration,

    /// When the previous request was sent
    last_request: Mutex<Option<Instant>>,
}

impl KaggleFetcher {
    /// Create a new fetcher from configuration
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the HTTP client cannot be created
    pub fn new(config: &Config) -> Result<Self, FetchError> {
        Self::with_settings(
            &config.scraper.base_url,
            &config.scraper.user_agent,
            config.request_timeout(),
            config.request_delay(),
        )
    }

    /// Create a new fetcher with explicit settings
    ///
    /// # Arguments
    ///
    /// * `base_url` - Site root for relative paths
    /// * `user_agent` - User-Agent header value
    /// * `timeout` - Per-request timeout
    /// * `delay` - Gap enforced between consecutive requests
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` if the HTTP client cannot be created
    pub fn with_settings(
        base_url: &str,
        user_agent: &str,
        timeout: Duration,
        delay: Duration,
    ) -> Result<Self, FetchError> {
        let client = Client::builder()
            .default_headers(build_page_headers(user_agent))
            .timeout(timeout)
            .gzip(true)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            delay,
            last_request: Mutex::new(None),
        })
    }

    /// Site root this fetcher resolves relative paths against
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured inter-request delay
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Resolve a path or absolute URL against the base URL
    pub fn resolve(&self, url: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else if url.starts_with('/') {
            format!("{}{url}", self.base_url)
        } else {
            format!("{}/{url}", self.base_url)
        }
    }

    /// Fetch a page and return its decoded markup
    ///
    /// # Arguments
    ///
    /// * `url` - Absolute URL or path relative to the base URL
    /// * `headers` - Extra headers merged over the defaults
    ///
    /// # Errors
    ///
    /// Returns `FetchError::Network` or `FetchError::Timeout` on transport
    /// failure and `FetchError::Http` on a non-success status
    pub async fn fetch(&self, url: &str, headers: Option<HeaderMap>) -> Result<String, FetchError> {
        let full_url = self.resolve(url);
        url::Url::parse(&full_url).map_err(|_| FetchError::InvalidUrl(full_url.clone()))?;

        self.throttle().await;

        tracing::debug!(url = %full_url, "Fetching page");

        let mut request = self.client.get(&full_url);
        if let Some(headers) = headers {
            request = request.headers(headers);
        }

        let result = request.send().await;
        self.mark_request();

        let response = result.map_err(|e| FetchError::from_transport(e, &full_url))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Http {
                status: status.as_u16(),
                url: full_url,
            });
        }

        self.decode_response(response, &full_url).await
    }

    /// Sleep until the configured delay has passed since the last request
    async fn throttle(&self) {
        let wait = {
            let last = self
                .last_request
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner());
            last.map(|sent| self.delay.saturating_sub(sent.elapsed()))
        };

        if let Some(wait) = wait.filter(|w| !w.is_zero()) {
            tracing::trace!(wait_ms = wait.as_millis() as u64, "Waiting before next request");
            tokio::time::sleep(wait).await;
        }
    }

    fn mark_request(&self) {
        let mut last = self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *last = Some(Instant::now());
    }

    async fn decode_response(&self, response: Response, url: &str) -> Result<String, FetchError> {
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .unwrap_or_default();

        let bytes = response
            .bytes()
            .await
            .map_err(|e| FetchError::from_transport(e, url))?;

        Ok(decode_bytes(&bytes, &content_type))
    }
}

/// Decode a response body using the charset named in `Content-Type`
///
/// Unknown or missing charsets fall back to UTF-8; invalid sequences are
/// replaced rather than rejected.
pub fn decode_bytes(bytes: &[u8], content_type: &str) -> String {
    let encoding = charset_label(content_type)
        .and_then(|label| Encoding::for_label(label.as_bytes()))
        .unwrap_or(UTF_8);

    let (text, _encoding, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::debug!(encoding = encoding.name(), "Body contained invalid sequences");
    }
    text.into_owned()
}

fn charset_label(content_type: &str) -> Option<String> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        key.trim()
            .eq_ignore_ascii_case("charset")
            .then(|| value.trim().trim_matches('"').to_ascii_lowercase())
    })
}
