// Core data structures for the kaggle-harvest scraper

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Competition overview record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: String, // slug, e.g. "titanic"
    pub title: String,
    pub description: String,
    pub evaluation_metric: String,
    pub reward: Option<String>,
    pub timeline: BTreeMap<String, String>, // milestone name -> date text
    pub url: String,
}

/// One forum post inside a discussion thread
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub author: String,
    pub body: String,
    pub timestamp: Option<DateTime<Utc>>,
}

/// Discussion thread with its posts in page order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct DiscussionThread {
    pub id: String,
    pub title: String,
    pub author: String,
    pub reply_count: u32,
    pub vote_count: i64,
    pub posts: Vec<Post>,
    pub url: String,
}

/// Notebook (kernel) entry returned by the API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Notebook {
    pub id: String, // API ref, e.g. "alice/titanic-eda"
    pub title: String,
    pub author: String,
    pub votes: i64,
    pub url: String,
    pub language: Option<String>,
    pub last_run_time: Option<String>,
}

/// Aggregate of one scrape, handed to the renderers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrapeResult {
    pub competition: Competition,
    pub discussion_threads: Vec<DiscussionThread>,
    pub notebooks: Vec<Notebook>,
    pub scraped_at: DateTime<Utc>,
}

impl ScrapeResult {
    /// Assemble a result stamped with the current time
    pub fn new(
        competition: Competition,
        discussion_threads: Vec<DiscussionThread>,
        notebooks: Vec<Notebook>,
    ) -> Self {
        Self {
            competition,
            discussion_threads,
            notebooks,
            scraped_at: Utc::now(),
        }
    }

    /// Total number of posts across all threads
    pub fn post_count(&self) -> usize {
        self.discussion_threads.iter().map(|t| t.posts.len()).sum()
    }
}

/// Limits applied while collecting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollectLimits {
    pub max_threads: usize,
    pub max_notebooks: usize,
    pub max_posts_per_thread: usize,
}

impl Default for CollectLimits {
    fn default() -> Self {
        Self {
            max_threads: 20,
            max_notebooks: 30,
            max_posts_per_thread: 10,
        }
    }
}

impl From<&crate::config::ScraperConfig> for CollectLimits {
    fn from(config: &crate::config::ScraperConfig) -> Self {
        Self {
            max_threads: config.max_threads,
            max_notebooks: config.max_notebooks,
            max_posts_per_thread: config.max_posts_per_thread,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_keys_are_camel_case() {
        let thread = DiscussionThread {
            id: "1".to_string(),
            reply_count: 3,
            vote_count: -1,
            ..Default::default()
        };
        let json = serde_json::to_string(&thread).unwrap();
        assert!(json.contains("\"replyCount\":3"));
        assert!(json.contains("\"voteCount\":-1"));
    }

    #[test]
    fn test_absent_reward_is_null() {
        let competition = Competition {
            id: "titanic".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&competition).unwrap();
        assert!(json.contains("\"reward\":null"));
    }

    #[test]
    fn test_thread_field_order() {
        let thread = DiscussionThread {
            id: "1".to_string(),
            url: "https://www.kaggle.com/competitions/titanic/discussion/1".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&thread).unwrap();
        assert_eq!(
            json,
            r#"{"id":"1","title":"","author":"","replyCount":0,"voteCount":0,"posts":[],"url":"https://www.kaggle.com/competitions/titanic/discussion/1"}"#
        );
    }

    #[test]
    fn test_post_count() {
        let threads = vec![
            DiscussionThread {
                posts: vec![Post::default(); 2],
                ..Default::default()
            },
            DiscussionThread {
                posts: vec![Post::default(); 3],
                ..Default::default()
            },
        ];
        let result = ScrapeResult::new(Competition::default(), threads, Vec::new());
        assert_eq!(result.post_count(), 5);
    }
}
