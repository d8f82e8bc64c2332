//! Configuration management for the kaggle-harvest scraper
//!
//! This module handles loading and validating configuration from environment variables,
//! files, and command-line arguments.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Public Kaggle site root
pub const DEFAULT_BASE_URL: &str = "https://www.kaggle.com";

/// Kaggle REST API root
pub const DEFAULT_API_BASE_URL: &str = "https://www.kaggle.com/api/v1";

/// Browser-like user agent; Kaggle serves a reduced page to unknown agents
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Scraper configuration
    #[serde(default)]
    pub scraper: ScraperConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scraper-specific configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperConfig {
    /// Maximum number of discussion threads to collect
    pub max_threads: usize,

    /// Maximum number of notebooks to collect
    pub max_notebooks: usize,

    /// Maximum number of posts kept per thread
    pub max_posts_per_thread: usize,

    /// User agent string
    pub user_agent: String,

    /// Delay between consecutive requests, in seconds
    pub request_delay_secs: f64,

    /// Request timeout in seconds
    pub request_timeout_secs: u64,

    /// Site root used to build page URLs
    pub base_url: String,

    /// API root used by the notebook client
    pub api_base_url: String,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (text, json)
    pub format: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_threads: 20,
            max_notebooks: 30,
            max_posts_per_thread: 10,
            user_agent: String::from(DEFAULT_USER_AGENT),
            request_delay_secs: 1.0,
            request_timeout_secs: 30,
            base_url: String::from(DEFAULT_BASE_URL),
            api_base_url: String::from(DEFAULT_API_BASE_URL),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: String::from("info"),
            format: String::from("text"),
        }
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse::<T>().ok())
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let defaults = ScraperConfig::default();

        let scraper = ScraperConfig {
            max_threads: env_parse("KAGGLE_HARVEST_MAX_THREADS").unwrap_or(defaults.max_threads),
            max_notebooks: env_parse("KAGGLE_HARVEST_MAX_NOTEBOOKS")
                .unwrap_or(defaults.max_notebooks),
            max_posts_per_thread: env_parse("KAGGLE_HARVEST_MAX_POSTS")
                .unwrap_or(defaults.max_posts_per_thread),
            user_agent: std::env::var("KAGGLE_HARVEST_USER_AGENT")
                .unwrap_or(defaults.user_agent),
            request_delay_secs: env_parse("KAGGLE_HARVEST_REQUEST_DELAY")
                .unwrap_or(defaults.request_delay_secs),
            request_timeout_secs: env_parse("KAGGLE_HARVEST_REQUEST_TIMEOUT")
                .unwrap_or(defaults.request_timeout_secs),
            base_url: std::env::var("KAGGLE_HARVEST_BASE_URL").unwrap_or(defaults.base_url),
            api_base_url: std::env::var("KAGGLE_HARVEST_API_BASE_URL")
                .unwrap_or(defaults.api_base_url),
        };

        let logging = LoggingConfig {
            level: std::env::var("KAGGLE_HARVEST_LOG_LEVEL")
                .unwrap_or_else(|_| String::from("info")),
            format: std::env::var("KAGGLE_HARVEST_LOG_FORMAT")
                .unwrap_or_else(|_| String::from("text")),
        };

        let config = Self { scraper, logging };
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: Self = toml::from_str(&content)
            .with_context(|| format!("Failed to parse TOML config file: {}", path.display()))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.scraper.max_threads == 0 {
            anyhow::bail!("max_threads must be greater than 0");
        }

        if self.scraper.max_notebooks == 0 {
            anyhow::bail!("max_notebooks must be greater than 0");
        }

        if self.scraper.max_posts_per_thread == 0 {
            anyhow::bail!("max_posts_per_thread must be greater than 0");
        }

        if !self.scraper.request_delay_secs.is_finite() || self.scraper.request_delay_secs < 0.0 {
            anyhow::bail!("request_delay_secs must be a non-negative number");
        }

        if self.scraper.request_timeout_secs == 0 {
            anyhow::bail!("request_timeout_secs must be greater than 0");
        }

        url::Url::parse(&self.scraper.base_url)
            .with_context(|| format!("Invalid base_url: {}", self.scraper.base_url))?;
        url::Url::parse(&self.scraper.api_base_url)
            .with_context(|| format!("Invalid api_base_url: {}", self.scraper.api_base_url))?;

        Ok(())
    }

    /// Get request timeout as Duration
    #[must_use]
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.scraper.request_timeout_secs)
    }

    /// Get inter-request delay as Duration
    #[must_use]
    pub fn request_delay(&self) -> Duration {
        Duration::from_secs_f64(self.scraper.request_delay_secs.max(0.0))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            scraper: ScraperConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scraper.max_threads, 20);
        assert_eq!(config.scraper.max_notebooks, 30);
        assert_eq!(config.scraper.max_posts_per_thread, 10);
    }

    #[test]
    fn test_zero_limits_rejected() {
        let mut config = Config::default();
        config.scraper.max_threads = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.scraper.max_posts_per_thread = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_negative_delay_rejected() {
        let mut config = Config::default();
        config.scraper.request_delay_secs = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_duration_conversion() {
        let mut config = Config::default();
        config.scraper.request_delay_secs = 0.25;
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.request_delay(), Duration::from_millis(250));
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: Config = toml::from_str(
            r#"
            [scraper]
            max_threads = 5
            "#,
        )
        .unwrap();

        assert_eq!(config.scraper.max_threads, 5);
        assert_eq!(config.scraper.max_notebooks, 30);
        assert_eq!(config.logging.format, "text");
    }
}
