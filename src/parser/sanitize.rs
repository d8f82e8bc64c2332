//! Text sanitization utilities for cleaning extracted page content
//!
//! This module provides functions to clean and normalize text extracted from
//! HTML pages, removing unwanted characters and normalizing whitespace.
//!
//! Input is text already decoded by `scraper`, so entities are not decoded
//! again here. A literal `&lt;` in a post stays `&lt;`.

use regex::Regex;
use std::sync::LazyLock;

// Pre-compiled regex patterns
static WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[ \t]+").unwrap());

static ANY_WHITESPACE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

static MULTI_NEWLINE_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\n{3,}").unwrap());

static COUNT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(-?\d[\d,]*(?:\.\d+)?)\s*(?:([kKmM])\b)?").unwrap());

/// Sanitize extracted text content
///
/// This function applies multiple cleaning steps:
/// 1. Remove zero-width characters
/// 2. Remove control characters (except newline/tab)
/// 3. Turn non-breaking spaces into plain spaces
/// 4. Normalize whitespace
/// 5. Trim each line
/// 6. Remove excessive blank lines
///
/// # Examples
///
/// ```
/// use kaggle_harvest::parser::sanitize::sanitize_text;
///
/// let dirty = "Hello\u{200B}World  \n\n\n\nTest";
/// let clean = sanitize_text(dirty);
/// assert_eq!(clean, "HelloWorld\n\nTest");
/// ```
pub fn sanitize_text(text: &str) -> String {
    let mut result = remove_zero_width(text);

    result = remove_control_chars(&result);
    result = replace_nbsp(&result);
    result = normalize_whitespace(&result);
    result = trim_lines(&result);
    result = collapse_newlines(&result);

    result.trim().to_string()
}

/// Collapse all whitespace, including newlines, into single spaces
///
/// # Examples
///
/// ```
/// use kaggle_harvest::parser::sanitize::single_line;
///
/// assert_eq!(single_line("  Top 1%\n\n  solution "), "Top 1% solution");
/// ```
pub fn single_line(text: &str) -> String {
    ANY_WHITESPACE_REGEX
        .replace_all(&sanitize_text(text), " ")
        .to_string()
}

/// Remove zero-width spaces and similar invisible characters
///
/// # Examples
///
/// ```
/// use kaggle_harvest::parser::sanitize::remove_zero_width;
///
/// let text = "a\u{200B}b\u{FEFF}c";
/// assert_eq!(remove_zero_width(text), "abc");
/// ```
pub fn remove_zero_width(text: &str) -> String {
    text.chars()
        .filter(|c| {
            !matches!(*c,
                '\u{200B}'..='\u{200F}' |
                '\u{2028}'..='\u{202F}' |
                '\u{FEFF}'
            )
        })
        .collect()
}

/// Remove control characters except newline and tab
pub fn remove_control_chars(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_control() || *c == '\n' || *c == '\t')
        .collect()
}

/// Replace non-breaking spaces with plain spaces
///
/// # Examples
///
/// ```
/// use kaggle_harvest::parser::sanitize::replace_nbsp;
///
/// assert_eq!(replace_nbsp("$10,000\u{a0}USD"), "$10,000 USD");
/// ```
pub fn replace_nbsp(text: &str) -> String {
    text.replace('\u{a0}', " ")
}

/// Normalize multiple spaces/tabs to single space
///
/// Does NOT affect newlines.
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_REGEX.replace_all(text, " ").to_string()
}

/// Trim whitespace from each line
pub fn trim_lines(text: &str) -> String {
    text.lines()
        .map(|line| line.trim())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Collapse 3+ consecutive newlines to 2
pub fn collapse_newlines(text: &str) -> String {
    MULTI_NEWLINE_REGEX.replace_all(text, "\n\n").to_string()
}

/// Check if text contains meaningful content
///
/// # Examples
///
/// ```
/// use kaggle_harvest::parser::sanitize::has_content;
///
/// assert!(has_content("Hello"));
/// assert!(!has_content("   \n\t  "));
/// ```
pub fn has_content(text: &str) -> bool {
    !text.trim().is_empty()
}

/// Parse a displayed counter such as `"12 replies"`, `"1,204"` or `"1.2k"`
///
/// Returns `None` when the text holds no number.
///
/// # Examples
///
/// ```
/// use kaggle_harvest::parser::sanitize::parse_count;
///
/// assert_eq!(parse_count("1,204 votes"), Some(1204));
/// assert_eq!(parse_count("1.2k"), Some(1200));
/// assert_eq!(parse_count("-3"), Some(-3));
/// assert_eq!(parse_count("no votes"), None);
/// ```
pub fn parse_count(text: &str) -> Option<i64> {
    let caps = COUNT_REGEX.captures(text)?;
    let number: f64 = caps.get(1)?.as_str().replace(',', "").parse().ok()?;
    let scale = match caps.get(2).map(|m| m.as_str()) {
        Some("k" | "K") => 1_000.0,
        Some("m" | "M") => 1_000_000.0,
        _ => 1.0,
    };
    Some((number * scale).round() as i64)
}
