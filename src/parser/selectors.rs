//! CSS selectors for Kaggle competition pages
//!
//! Every extracted field is reached through exactly one named selector list.
//! Lists are tried in order and the first non-empty match wins, so an
//! upstream redesign is handled by editing a single list here.

use lazy_static::lazy_static;
use scraper::{ElementRef, Selector};

use crate::parser::sanitize::has_content;

// Helper macro to parse selectors safely at compile time
macro_rules! parse_selector {
    ($s:expr) => {
        Selector::parse($s).expect(concat!("Invalid CSS selector: ", $s))
    };
}

macro_rules! text {
    ($s:expr) => {
        FieldSelector {
            selector: parse_selector!($s),
            source: Source::Text,
        }
    };
}

macro_rules! attr {
    ($s:expr, $a:expr) => {
        FieldSelector {
            selector: parse_selector!($s),
            source: Source::Attr($a),
        }
    };
}

/// Where a field's value is read from once its element matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Concatenated text content
    Text,
    /// Value of the named attribute
    Attr(&'static str),
}

/// A selector paired with the place its value lives
pub struct FieldSelector {
    pub selector: Selector,
    pub source: Source,
}

impl FieldSelector {
    /// Read this field from a matched element
    pub fn read(&self, element: ElementRef<'_>) -> Option<String> {
        let value = match self.source {
            Source::Text => element.text().collect::<String>(),
            Source::Attr(name) => element.value().attr(name)?.to_string(),
        };
        has_content(&value).then_some(value)
    }
}

/// First non-empty value produced by `selectors` under `root`
pub fn first_match(root: ElementRef<'_>, selectors: &[FieldSelector]) -> Option<String> {
    selectors.iter().find_map(|field| {
        root.select(&field.selector)
            .find_map(|element| field.read(element))
    })
}

/// First element matched by any of `selectors` under `root`
pub fn first_element<'a>(root: ElementRef<'a>, selectors: &[Selector]) -> Option<ElementRef<'a>> {
    selectors
        .iter()
        .find_map(|selector| root.select(selector).next())
}

/// All elements matched by the first selector that matches anything
pub fn all_elements<'a>(root: ElementRef<'a>, selectors: &[Selector]) -> Vec<ElementRef<'a>> {
    selectors
        .iter()
        .map(|selector| root.select(selector).collect::<Vec<_>>())
        .find(|found| !found.is_empty())
        .unwrap_or_default()
}

lazy_static! {
    // Overview page
    static ref PAGE_MARKERS: Vec<Selector> = vec![
        parse_selector!("title"),
        parse_selector!("meta[property='og:title']"),
        parse_selector!("meta[name='description']"),
        parse_selector!("[data-testid='competition-overview']"),
        parse_selector!("#site-content"),
    ];

    static ref OVERVIEW_TITLE: Vec<FieldSelector> = vec![
        attr!("meta[property='og:title']", "content"),
        text!("[data-testid='competition-title']"),
        text!("title"),
        text!("h1"),
    ];

    static ref OVERVIEW_DESCRIPTION: Vec<FieldSelector> = vec![
        attr!("meta[name='description']", "content"),
        attr!("meta[property='og:description']", "content"),
        text!("[data-testid='competition-description']"),
        text!("#description"),
    ];

    static ref OVERVIEW_EVALUATION: Vec<FieldSelector> = vec![
        text!("[data-testid='competition-evaluation']"),
        text!("#evaluation"),
        text!("[id='evaluation-metric']"),
        attr!("meta[name='kaggle:evaluation']", "content"),
    ];

    static ref OVERVIEW_REWARD: Vec<FieldSelector> = vec![
        text!("[data-testid='competition-reward']"),
        text!("#prizes"),
        text!(".competition-reward"),
        attr!("meta[name='kaggle:reward']", "content"),
    ];

    static ref TIMELINE_ITEMS: Vec<Selector> = vec![
        parse_selector!("[data-testid='competition-timeline'] li"),
        parse_selector!("#timeline li"),
        parse_selector!(".competition-timeline li"),
    ];

    static ref TIMELINE_NAME: Vec<FieldSelector> = vec![
        text!("[data-testid='milestone-name']"),
        text!(".milestone-name"),
        text!("strong"),
    ];

    static ref TIMELINE_DATE: Vec<FieldSelector> = vec![
        attr!("time[datetime]", "datetime"),
        text!("time"),
        text!("[data-testid='milestone-date']"),
        text!(".milestone-date"),
    ];

    // Discussion listing page
    static ref THREAD_ITEMS: Vec<Selector> = vec![
        parse_selector!("[data-testid='discussion-list-item']"),
        parse_selector!("li.discussion-list-item"),
        parse_selector!(".topic-list-item"),
    ];

    static ref THREAD_LINK: Vec<Selector> = vec![
        parse_selector!("a[data-testid='topic-title']"),
        parse_selector!("a.topic-title"),
        parse_selector!("a[href*='/discussion/']"),
    ];

    static ref THREAD_TITLE: Vec<FieldSelector> = vec![
        text!("[data-testid='topic-title']"),
        text!(".topic-title"),
        text!("a[href*='/discussion/']"),
    ];

    static ref THREAD_AUTHOR: Vec<FieldSelector> = vec![
        text!("[data-testid='author-name']"),
        text!(".author"),
        text!("a[href^='/'][class*='author']"),
    ];

    static ref THREAD_REPLIES: Vec<FieldSelector> = vec![
        text!("[data-testid='reply-count']"),
        text!(".reply-count"),
        text!(".topic-replies"),
    ];

    static ref THREAD_VOTES: Vec<FieldSelector> = vec![
        text!("[data-testid='vote-count']"),
        text!(".vote-count"),
        text!(".topic-votes"),
    ];

    static ref DISCUSSION_ANCHORS: Vec<Selector> = vec![
        parse_selector!("a[href*='/discussion/']"),
    ];

    // Thread detail page
    static ref POST_ITEMS: Vec<Selector> = vec![
        parse_selector!("[data-testid='discussion-post']"),
        parse_selector!(".forum-message"),
        parse_selector!("article.post"),
    ];

    static ref POST_AUTHOR: Vec<FieldSelector> = vec![
        text!("[data-testid='author-name']"),
        text!(".author"),
        text!(".forum-message__author"),
    ];

    static ref POST_BODY: Vec<FieldSelector> = vec![
        text!("[data-testid='post-body']"),
        text!(".message-body"),
        text!(".markdown-converter__text"),
        text!(".forum-message__body"),
    ];

    static ref POST_TIMESTAMP: Vec<FieldSelector> = vec![
        attr!("time[datetime]", "datetime"),
        attr!("span[title]", "title"),
        text!("time"),
    ];
}

/// Selectors for the competition overview page
pub struct OverviewSelectors {
    pub markers: &'static [Selector],
    pub title: &'static [FieldSelector],
    pub description: &'static [FieldSelector],
    pub evaluation: &'static [FieldSelector],
    pub reward: &'static [FieldSelector],
    pub timeline_items: &'static [Selector],
    pub timeline_name: &'static [FieldSelector],
    pub timeline_date: &'static [FieldSelector],
}

impl OverviewSelectors {
    pub fn new() -> Self {
        Self {
            markers: &PAGE_MARKERS,
            title: &OVERVIEW_TITLE,
            description: &OVERVIEW_DESCRIPTION,
            evaluation: &OVERVIEW_EVALUATION,
            reward: &OVERVIEW_REWARD,
            timeline_items: &TIMELINE_ITEMS,
            timeline_name: &TIMELINE_NAME,
            timeline_date: &TIMELINE_DATE,
        }
    }
}

impl Default for OverviewSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for the discussion listing page
pub struct ListingSelectors {
    pub items: &'static [Selector],
    pub link: &'static [Selector],
    pub title: &'static [FieldSelector],
    pub author: &'static [FieldSelector],
    pub replies: &'static [FieldSelector],
    pub votes: &'static [FieldSelector],
    pub anchors: &'static [Selector],
}

impl ListingSelectors {
    pub fn new() -> Self {
        Self {
            items: &THREAD_ITEMS,
            link: &THREAD_LINK,
            title: &THREAD_TITLE,
            author: &THREAD_AUTHOR,
            replies: &THREAD_REPLIES,
            votes: &THREAD_VOTES,
            anchors: &DISCUSSION_ANCHORS,
        }
    }
}

impl Default for ListingSelectors {
    fn default() -> Self {
        Self::new()
    }
}

/// Selectors for a discussion thread page
pub struct PostSelectors {
    pub items: &'static [Selector],
    pub author: &'static [FieldSelector],
    pub body: &'static [FieldSelector],
    pub timestamp: &'static [FieldSelector],
}

impl PostSelectors {
    pub fn new() -> Self {
        Self {
            items: &POST_ITEMS,
            author: &POST_AUTHOR,
            body: &POST_BODY,
            timestamp: &POST_TIMESTAMP,
        }
    }
}

impl Default for PostSelectors {
    fn default() -> Self {
        Self::new()
    }
}
