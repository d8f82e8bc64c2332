//! Markdown report rendering with Handlebars
//!
//! The report has one `#` heading for the competition, `##` headings for the
//! sections and exactly one `###` heading per thread and per notebook.
//! Free text is reduced to single lines or quoted so it cannot introduce
//! headings of its own.

use handlebars::{no_escape, Handlebars};
use serde::Serialize;
use std::path::Path;

use crate::error::Result;
use crate::models::{DiscussionThread, Notebook, Post, ScrapeResult};
use crate::parser::sanitize::single_line;

/// Built-in report template
const DEFAULT_TEMPLATE: &str = include_str!("../../templates/report.hbs");

const TEMPLATE_NAME: &str = "report";

#[derive(Debug, Serialize)]
struct ReportData {
    id: String,
    title: String,
    url: String,
    scraped_at: String,
    description: String,
    evaluation: String,
    reward: Option<String>,
    timeline: Vec<MilestoneData>,
    thread_count: usize,
    threads: Vec<ThreadData>,
    notebook_count: usize,
    notebooks: Vec<NotebookData>,
}

#[derive(Debug, Serialize)]
struct MilestoneData {
    name: String,
    date: String,
}

#[derive(Debug, Serialize)]
struct ThreadData {
    title: String,
    author: String,
    reply_count: u32,
    vote_count: i64,
    url: String,
    posts: Vec<PostData>,
}

#[derive(Debug, Serialize)]
struct PostData {
    author: String,
    timestamp: Option<String>,
    body: String,
}

#[derive(Debug, Serialize)]
struct NotebookData {
    title: String,
    author: String,
    votes: i64,
    url: String,
    language: Option<String>,
    last_run_time: Option<String>,
}

impl From<&ScrapeResult> for ReportData {
    fn from(result: &ScrapeResult) -> Self {
        let competition = &result.competition;

        Self {
            id: competition.id.clone(),
            title: or_placeholder(&single_line(&competition.title), &competition.id),
            url: competition.url.clone(),
            scraped_at: result.scraped_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            description: blockquote(&competition.description, "_No description available._"),
            evaluation: blockquote(&competition.evaluation_metric, "_Not described._"),
            reward: competition
                .reward
                .as_deref()
                .map(single_line)
                .filter(|r| !r.is_empty()),
            timeline: competition
                .timeline
                .iter()
                .map(|(name, date)| MilestoneData {
                    name: single_line(name),
                    date: single_line(date),
                })
                .collect(),
            thread_count: result.discussion_threads.len(),
            threads: result.discussion_threads.iter().map(ThreadData::from).collect(),
            notebook_count: result.notebooks.len(),
            notebooks: result.notebooks.iter().map(NotebookData::from).collect(),
        }
    }
}

impl From<&DiscussionThread> for ThreadData {
    fn from(thread: &DiscussionThread) -> Self {
        Self {
            title: or_placeholder(&single_line(&thread.title), "(untitled thread)"),
            author: or_placeholder(&single_line(&thread.author), "unknown"),
            reply_count: thread.reply_count,
            vote_count: thread.vote_count,
            url: thread.url.clone(),
            posts: thread.posts.iter().map(PostData::from).collect(),
        }
    }
}

impl From<&Post> for PostData {
    fn from(post: &Post) -> Self {
        Self {
            author: or_placeholder(&single_line(&post.author), "unknown"),
            timestamp: post.timestamp.map(|t| t.format("%Y-%m-%d %H:%M").to_string()),
            body: single_line(&post.body),
        }
    }
}

impl From<&Notebook> for NotebookData {
    fn from(notebook: &Notebook) -> Self {
        Self {
            title: or_placeholder(&single_line(&notebook.title), &notebook.id),
            author: or_placeholder(&single_line(&notebook.author), "unknown"),
            votes: notebook.votes,
            url: notebook.url.clone(),
            language: notebook.language.clone().filter(|l| !l.is_empty()),
            last_run_time: notebook.last_run_time.clone().filter(|t| !t.is_empty()),
        }
    }
}

fn or_placeholder(value: &str, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value.to_string()
    }
}

/// Quote multi-line text, escaping leading `#` so no line reads as a heading
fn blockquote(text: &str, empty: &str) -> String {
    let text = text.trim();
    if text.is_empty() {
        return empty.to_string();
    }

    text.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                ">".to_string()
            } else if line.trim_start().starts_with('#') {
                format!("> \\{}", line.trim_start())
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Markdown renderer backed by a Handlebars registry
pub struct MarkdownRenderer<'a> {
    handlebars: Handlebars<'a>,
}

impl<'a> MarkdownRenderer<'a> {
    /// Create a renderer with the built-in template
    ///
    /// # Errors
    ///
    /// Returns an error if the template fails to compile
    pub fn new() -> Result<Self> {
        let mut handlebars = Self::registry();
        handlebars.register_template_string(TEMPLATE_NAME, DEFAULT_TEMPLATE)?;
        Ok(Self { handlebars })
    }

    /// Create a renderer from a custom template file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or compiled
    pub fn with_template(template_path: &Path) -> Result<Self> {
        let mut handlebars = Self::registry();
        handlebars.register_template_file(TEMPLATE_NAME, template_path)?;
        Ok(Self { handlebars })
    }

    fn registry() -> Handlebars<'a> {
        let mut handlebars = Handlebars::new();
        // Output is Markdown, not HTML
        handlebars.register_escape_fn(no_escape);
        handlebars
    }

    /// Render a scrape result to Markdown
    ///
    /// # Errors
    ///
    /// Returns an error if rendering fails
    pub fn render(&self, result: &ScrapeResult) -> Result<String> {
        let data = ReportData::from(result);
        Ok(self.handlebars.render(TEMPLATE_NAME, &data)?)
    }
}

/// Render a scrape result with the built-in template
///
/// # Errors
///
/// Returns an error if rendering fails
pub fn to_markdown(result: &ScrapeResult) -> Result<String> {
    MarkdownRenderer::new()?.render(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Competition;
    use chrono::{TimeZone, Utc};

    fn heading_count(markdown: &str, prefix: &str) -> usize {
        markdown.lines().filter(|l| l.starts_with(prefix)).count()
    }

    fn sample_result() -> ScrapeResult {
        let mut competition = Competition {
            id: "titanic".to_string(),
            title: "Titanic - Machine Learning from Disaster".to_string(),
            description: "Predict survival.\n# Not a heading\n\nSecond paragraph".to_string(),
            evaluation_metric: "Accuracy".to_string(),
            reward: Some("Knowledge".to_string()),
            url: "https://www.kaggle.com/competitions/titanic".to_string(),
            ..Default::default()
        };
        competition
            .timeline
            .insert("Final Submission Deadline".to_string(), "2030-01-01".to_string());

        let threads = vec![
            DiscussionThread {
                id: "1".to_string(),
                title: "Getting started".to_string(),
                author: "alice".to_string(),
                reply_count: 2,
                vote_count: 5,
                url: "https://www.kaggle.com/competitions/titanic/discussion/1".to_string(),
                posts: vec![Post {
                    author: "alice".to_string(),
                    body: "Line one\n### line two".to_string(),
                    timestamp: Some(Utc.with_ymd_and_hms(2024, 3, 4, 10, 22, 3).unwrap()),
                }],
            },
            DiscussionThread {
                id: "2".to_string(),
                title: "Feature ideas".to_string(),
                ..Default::default()
            },
        ];

        let notebooks = vec![Notebook {
            id: "bob/eda".to_string(),
            title: "EDA".to_string(),
            author: "bob".to_string(),
            votes: 10,
            url: "https://www.kaggle.com/code/bob/eda".to_string(),
            language: Some("python".to_string()),
            last_run_time: None,
        }];

        ScrapeResult::new(competition, threads, notebooks)
    }

    #[test]
    fn test_one_subheading_per_thread_and_notebook() {
        let markdown = to_markdown(&sample_result()).unwrap();

        assert_eq!(heading_count(&markdown, "# "), 1);
        assert_eq!(heading_count(&markdown, "### "), 3);
        assert!(markdown.contains("### Getting started"));
        assert!(markdown.contains("### EDA"));
        assert!(markdown.contains("> \\# Not a heading"));
        assert!(markdown.contains("Line one ### line two"));
        assert!(markdown.contains("(2024-03-04 10:22)"));
    }

    #[test]
    fn test_empty_sections_keep_headings() {
        let result = ScrapeResult::new(
            Competition {
                id: "empty".to_string(),
                ..Default::default()
            },
            Vec::new(),
            Vec::new(),
        );

        let markdown = to_markdown(&result).unwrap();
        assert!(markdown.starts_with("# empty"));
        assert!(markdown.contains("## Discussion Threads (0)"));
        assert!(markdown.contains("## Notebooks (0)"));
        assert!(markdown.contains("_No discussion threads collected._"));
        assert!(markdown.contains("_Not listed._"));
        assert_eq!(heading_count(&markdown, "### "), 0);
    }

    #[test]
    fn test_no_html_escaping() {
        let mut result = sample_result();
        result.competition.title = "R&D <Challenge>".to_string();

        let markdown = to_markdown(&result).unwrap();
        assert!(markdown.starts_with("# R&D <Challenge>"));
    }

    #[test]
    fn test_blockquote() {
        assert_eq!(blockquote("", "none"), "none");
        assert_eq!(blockquote("a\n\nb", "none"), "> a\n>\n> b");
        assert_eq!(blockquote("  ## b", "none"), "> \\## b");
    }
}
