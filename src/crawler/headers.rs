use reqwest::header::{
    HeaderMap, HeaderName, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, REFERER, USER_AGENT,
};

use crate::config::DEFAULT_USER_AGENT;

/// Build browser-like headers for Kaggle page requests
///
/// An invalid `user_agent` value falls back to the default browser agent.
///
/// # Examples
///
/// ```
/// use kaggle_harvest::crawler::headers::build_page_headers;
///
/// let headers = build_page_headers("Mozilla/5.0 (X11; Linux x86_64)");
/// assert!(headers.contains_key("user-agent"));
/// ```
pub fn build_page_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let agent = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(USER_AGENT, agent);
    headers.insert(
        ACCEPT,
        HeaderValue::from_static(
            "text/html,application/xhtml+xml,application/xml;q=0.9,image/webp,*/*;q=0.8",
        ),
    );
    headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
    headers.insert(
        HeaderName::from_static("upgrade-insecure-requests"),
        HeaderValue::from_static("1"),
    );

    headers
}

/// Headers for a subordinate page reached from `referer`
///
/// Returns an empty map when `referer` is not a valid header value.
pub fn build_referer_headers(referer: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    if let Ok(value) = HeaderValue::from_str(referer) {
        headers.insert(REFERER, value);
    }
    headers.insert(
        HeaderName::from_static("sec-fetch-site"),
        HeaderValue::from_static("same-origin"),
    );

    headers
}

/// Headers for Kaggle REST API calls
pub fn build_api_headers(user_agent: &str) -> HeaderMap {
    let mut headers = HeaderMap::new();

    let agent = HeaderValue::from_str(user_agent)
        .unwrap_or_else(|_| HeaderValue::from_static(DEFAULT_USER_AGENT));
    headers.insert(USER_AGENT, agent);
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

    headers
}
