//! Discussion listing and thread page extraction

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use scraper::{ElementRef, Html};
use std::collections::HashSet;

use crate::crawler::url::{extract_thread_id, thread_path};
use crate::models::{DiscussionThread, Post};
use crate::parser::sanitize::{parse_count, sanitize_text, single_line};
use crate::parser::selectors::{
    all_elements, first_element, first_match, ListingSelectors, PostSelectors,
};

/// Thread summary as shown on the listing page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThreadSummary {
    pub id: String,
    pub title: String,
    pub author: String,
    pub reply_count: u32,
    pub vote_count: i64,
    pub url: String,
}

impl ThreadSummary {
    /// Attach posts collected from the thread page
    pub fn into_thread(self, posts: Vec<Post>) -> DiscussionThread {
        DiscussionThread {
            id: self.id,
            title: self.title,
            author: self.author,
            reply_count: self.reply_count,
            vote_count: self.vote_count,
            url: self.url,
            posts,
        }
    }
}

/// Parser for discussion listing and thread pages
pub struct DiscussionParser {
    listing: ListingSelectors,
    posts: PostSelectors,
}

impl DiscussionParser {
    #[must_use]
    pub fn new() -> Self {
        Self {
            listing: ListingSelectors::new(),
            posts: PostSelectors::new(),
        }
    }

    /// Extract up to `max_threads` summaries in listing order
    ///
    /// Listing items are used when present; otherwise every discussion link
    /// on the page becomes a summary, with repeated links to the same thread
    /// on that page counted once.
    pub fn parse_listing(
        &self,
        html: &str,
        base_url: &str,
        slug: &str,
        max_threads: usize,
    ) -> Vec<ThreadSummary> {
        let document = Html::parse_document(html);
        let root = document.root_element();
        let base = base_url.trim_end_matches('/');

        let items = all_elements(root, self.listing.items);
        let summaries: Vec<ThreadSummary> = if items.is_empty() {
            self.summaries_from_anchors(root, base, slug, max_threads)
        } else {
            items
                .into_iter()
                .filter_map(|item| self.summary_from_item(item, base, slug))
                .take(max_threads)
                .collect()
        };

        tracing::debug!(
            competition = slug,
            threads = summaries.len(),
            "Parsed discussion listing"
        );
        summaries
    }

    fn summary_from_item(
        &self,
        item: ElementRef<'_>,
        base: &str,
        slug: &str,
    ) -> Option<ThreadSummary> {
        let link = first_element(item, self.listing.link)?;
        let id = extract_thread_id(link.value().attr("href")?)?;

        let title = first_match(item, self.listing.title)
            .or_else(|| Some(link.text().collect::<String>()))
            .map(|t| single_line(&t))
            .unwrap_or_default();
        let author = first_match(item, self.listing.author)
            .map(|a| single_line(&a))
            .unwrap_or_default();
        let reply_count = first_match(item, self.listing.replies)
            .and_then(|r| parse_count(&r))
            .map(|r| r.clamp(0, i64::from(u32::MAX)) as u32)
            .unwrap_or(0);
        let vote_count = first_match(item, self.listing.votes)
            .and_then(|v| parse_count(&v))
            .unwrap_or(0);

        Some(ThreadSummary {
            url: format!("{base}{}", thread_path(slug, &id)),
            id,
            title,
            author,
            reply_count,
            vote_count,
        })
    }

    fn summaries_from_anchors(
        &self,
        root: ElementRef<'_>,
        base: &str,
        slug: &str,
        max_threads: usize,
    ) -> Vec<ThreadSummary> {
        let mut seen = HashSet::new();

        all_elements(root, self.listing.anchors)
            .into_iter()
            .filter_map(|anchor| {
                let id = extract_thread_id(anchor.value().attr("href")?)?;
                let title = single_line(&anchor.text().collect::<String>());
                Some((id, title))
            })
            .filter(|(id, title)| !title.is_empty() && seen.insert(id.clone()))
            .take(max_threads)
            .map(|(id, title)| ThreadSummary {
                url: format!("{base}{}", thread_path(slug, &id)),
                id,
                title,
                author: String::new(),
                reply_count: 0,
                vote_count: 0,
            })
            .collect()
    }

    /// Extract up to `max_posts` posts in page order
    pub fn parse_posts(&self, html: &str, max_posts: usize) -> Vec<Post> {
        let document = Html::parse_document(html);
        let root = document.root_element();

        all_elements(root, self.posts.items)
            .into_iter()
            .take(max_posts)
            .map(|item| self.post_from_item(item))
            .collect()
    }

    fn post_from_item(&self, item: ElementRef<'_>) -> Post {
        let author = first_match(item, self.posts.author)
            .map(|a| single_line(&a))
            .unwrap_or_default();
        let body = first_match(item, self.posts.body)
            .unwrap_or_else(|| item.text().collect::<String>());
        let timestamp = first_match(item, self.posts.timestamp)
            .and_then(|t| parse_timestamp(&t));

        Post {
            author,
            body: sanitize_text(&body),
            timestamp,
        }
    }
}

impl Default for DiscussionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the timestamp formats Kaggle shows on posts
///
/// Accepts RFC 3339, ISO-like naive datetimes (taken as UTC), plain dates and
/// the browser tooltip form `Mon Mar 04 2024 10:22:03 GMT+0000 (...)`.
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    let clean = text.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(clean) {
        return Some(dt.with_timezone(&Utc));
    }

    let without_zone = clean.split(" GMT").next().unwrap_or(clean).trim();

    let formats = [
        "%Y-%m-%dT%H:%M:%S%.f", // 2024-03-04T10:22:03.123
        "%Y-%m-%d %H:%M:%S",    // 2024-03-04 10:22:03
        "%Y-%m-%d %H:%M",       // 2024-03-04 10:22
        "%a %b %d %Y %H:%M:%S", // Mon Mar 04 2024 10:22:03
    ];

    for format in &formats {
        if let Ok(naive) = NaiveDateTime::parse_from_str(without_zone, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    NaiveDate::parse_from_str(without_zone, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    const BASE: &str = "https://www.kaggle.com";

    #[test]
    fn test_parse_listing_items() {
        let html = r#"<html><body><ul>
            <li class="discussion-list-item">
                <a class="topic-title" href="/competitions/titanic/discussion/101">Getting started</a>
                <span class="author">alice</span>
                <span class="reply-count">12 replies</span>
                <span class="vote-count">34</span>
            </li>
            <li class="discussion-list-item">
                <a class="topic-title" href="/competitions/titanic/discussion/102">Feature ideas</a>
                <span class="author">bob</span>
                <span class="reply-count">0</span>
                <span class="vote-count">-2</span>
            </li>
        </ul></body></html>"#;

        let summaries = DiscussionParser::new().parse_listing(html, BASE, "titanic", 10);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "101");
        assert_eq!(summaries[0].title, "Getting started");
        assert_eq!(summaries[0].author, "alice");
        assert_eq!(summaries[0].reply_count, 12);
        assert_eq!(summaries[0].vote_count, 34);
        assert_eq!(
            summaries[0].url,
            "https://www.kaggle.com/competitions/titanic/discussion/101"
        );
        assert_eq!(summaries[1].vote_count, -2);
    }

    #[test]
    fn test_parse_listing_respects_limit() {
        let items: String = (1..=5)
            .map(|i| {
                format!(
                    r#"<li class="discussion-list-item"><a href="/competitions/t/discussion/{i}">Thread {i}</a></li>"#
                )
            })
            .collect();
        let html = format!("<html><body><ul>{items}</ul></body></html>");

        let summaries = DiscussionParser::new().parse_listing(&html, BASE, "t", 3);
        let ids: Vec<&str> = summaries.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_parse_listing_anchor_fallback() {
        let html = r#"<html><body>
            <a href="/competitions/t/discussion/7">First</a>
            <a href="/competitions/t/discussion/7">First again</a>
            <a href="/competitions/t/discussion">All topics</a>
            <a href="/competitions/t/discussion/9">Second</a>
        </body></html>"#;

        let summaries = DiscussionParser::new().parse_listing(html, BASE, "t", 10);
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].id, "7");
        assert_eq!(summaries[0].title, "First");
        assert_eq!(summaries[1].id, "9");
    }

    #[test]
    fn test_parse_posts() {
        let html = r#"<html><body>
            <div class="forum-message">
                <span class="author">alice</span>
                <time datetime="2024-03-04T10:22:03Z">2 months ago</time>
                <div class="message-body"><p>Welcome   to the
                competition!</p></div>
            </div>
            <div class="forum-message">
                <span class="author">bob</span>
                <div class="message-body">Thanks!</div>
            </div>
            <div class="forum-message">
                <span class="author">carol</span>
                <div class="message-body">Third</div>
            </div>
        </body></html>"#;

        let posts = DiscussionParser::new().parse_posts(html, 2);
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].author, "alice");
        assert_eq!(posts[0].body, "Welcome to the\ncompetition!");
        assert!(posts[0].timestamp.is_some());
        assert_eq!(posts[1].author, "bob");
        assert_eq!(posts[1].timestamp, None);
    }

    #[test]
    fn test_parse_posts_keeps_escaped_markup() {
        let html = r#"<div class="forum-message">
            <span class="author">dave</span>
            <div class="message-body">Escape it as &amp;lt;br&amp;gt; in XML</div>
        </div>"#;

        let posts = DiscussionParser::new().parse_posts(html, 10);
        assert_eq!(posts[0].body, "Escape it as &lt;br&gt; in XML");
    }

    #[test]
    fn test_parse_posts_empty_page() {
        let posts = DiscussionParser::new().parse_posts("<html></html>", 10);
        assert!(posts.is_empty());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2024-03-04T10:22:03+02:00").unwrap();
        assert_eq!(rfc.hour(), 8);

        let tooltip =
            parse_timestamp("Mon Mar 04 2024 10:22:03 GMT+0000 (Coordinated Universal Time)")
                .unwrap();
        assert_eq!(tooltip.format("%Y-%m-%d %H:%M").to_string(), "2024-03-04 10:22");

        let date_only = parse_timestamp("2024-03-04").unwrap();
        assert_eq!(date_only.hour(), 0);

        assert!(parse_timestamp("2 months ago").is_none());
    }
}
