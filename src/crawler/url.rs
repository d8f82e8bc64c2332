//! Competition URL parsing and page URL construction
//!
//! Accepted competition URL shapes:
//! - `https://www.kaggle.com/competitions/{slug}`
//! - `https://www.kaggle.com/c/{slug}` (legacy short form)
//!
//! Any trailing path (`/overview`, `/discussion`, ...) and query string is ignored.

use regex::Regex;
use std::sync::LazyLock;

use crate::utils::error::ExtractionError;

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/(?:competitions|c)/([A-Za-z0-9][A-Za-z0-9_-]*)").expect("valid slug regex")
});

static THREAD_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/discussion/(\d+)").expect("valid thread id regex"));

/// Extract the competition slug from a competition URL
///
/// # Errors
///
/// Returns `ExtractionError::InvalidCompetitionUrl` if no slug is present
///
/// # Examples
///
/// ```
/// use kaggle_harvest::crawler::url::extract_competition_slug;
///
/// let slug = extract_competition_slug("https://www.kaggle.com/competitions/titanic/overview").unwrap();
/// assert_eq!(slug, "titanic");
/// ```
pub fn extract_competition_slug(url: &str) -> Result<String, ExtractionError> {
    SLUG_PATTERN
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or_else(|| ExtractionError::InvalidCompetitionUrl(url.to_string()))
}

/// Extract the numeric thread id from a discussion link
pub fn extract_thread_id(href: &str) -> Option<String> {
    THREAD_ID_PATTERN
        .captures(href)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Path of the competition overview page
pub fn overview_path(slug: &str) -> String {
    format!("/competitions/{slug}")
}

/// Path of the discussion listing page
pub fn discussion_list_path(slug: &str) -> String {
    format!("/competitions/{slug}/discussion")
}

/// Path of one discussion thread
pub fn thread_path(slug: &str, thread_id: &str) -> String {
    format!("/competitions/{slug}/discussion/{thread_id}")
}

/// Public page URL of a notebook given its API ref (`owner/slug`)
pub fn notebook_url(base_url: &str, notebook_ref: &str) -> String {
    if notebook_ref.starts_with("http://") || notebook_ref.starts_with("https://") {
        return notebook_ref.to_string();
    }

    let base = base_url.trim_end_matches('/');
    let reference = notebook_ref.trim_start_matches('/');
    if reference.starts_with("code/") || reference.contains("/code/") {
        format!("{base}/{reference}")
    } else {
        match reference.split_once('/') {
            Some((owner, slug)) => format!("{base}/code/{owner}/{slug}"),
            None => format!("{base}/code/{reference}"),
        }
    }
}
