use anyhow::{Context, Result};
use std::path::PathBuf;

use kaggle_harvest::config::Config;
use kaggle_harvest::crawler::CompetitionScraper;
use kaggle_harvest::utils::format_bytes;

use super::{print_written, report_writer};

/// Options for the `scrape` command
#[derive(Debug, Clone, Default)]
pub struct ScrapeParams {
    pub url: String,
    pub output: PathBuf,
    pub config_file: Option<PathBuf>,
    pub max_threads: Option<usize>,
    pub max_notebooks: Option<usize>,
    pub max_posts: Option<usize>,
    pub delay: Option<f64>,
    pub user_agent: Option<String>,
    pub template: Option<PathBuf>,
    pub no_csv: bool,
}

impl ScrapeParams {
    /// Load configuration and apply command-line overrides
    pub fn resolve_config(&self) -> Result<Config> {
        let mut config = match &self.config_file {
            Some(path) => Config::from_file(path)?,
            None => Config::from_env()?,
        };

        let scraper = &mut config.scraper;
        if let Some(max_threads) = self.max_threads {
            scraper.max_threads = max_threads;
        }
        if let Some(max_notebooks) = self.max_notebooks {
            scraper.max_notebooks = max_notebooks;
        }
        if let Some(max_posts) = self.max_posts {
            scraper.max_posts_per_thread = max_posts;
        }
        if let Some(delay) = self.delay {
            scraper.request_delay_secs = delay;
        }
        if let Some(user_agent) = &self.user_agent {
            scraper.user_agent = user_agent.clone();
        }

        config.validate().context("Invalid configuration")?;
        Ok(config)
    }
}

pub async fn scrape(params: ScrapeParams) -> Result<()> {
    let config = params.resolve_config()?;

    println!("Scraping Kaggle competition");
    println!("===========================");
    println!("URL: {}", params.url);
    println!(
        "Limits: {} threads, {} posts/thread, {} notebooks",
        config.scraper.max_threads,
        config.scraper.max_posts_per_thread,
        config.scraper.max_notebooks
    );
    println!("Delay: {:.1}s between requests", config.scraper.request_delay_secs);

    // Load the template before any request is made
    let writer = report_writer(&params.output, params.template.as_deref(), params.no_csv)?;

    let scraper = CompetitionScraper::new(config).context("Failed to create scraper")?;
    let result = scraper
        .scrape_all_competition_data(&params.url)
        .await
        .with_context(|| format!("Failed to scrape {}", params.url))?;

    let report = writer.write(&result)?;

    println!("\nScrape Summary");
    println!("==============");
    println!("Competition: {} ({})", result.competition.title, result.competition.id);
    if let Some(reward) = &result.competition.reward {
        println!("Reward: {reward}");
    }
    println!("Timeline milestones: {}", result.competition.timeline.len());
    println!("Discussion threads: {}", result.discussion_threads.len());
    println!("Posts: {}", result.post_count());
    println!("Notebooks: {}", result.notebooks.len());
    print_written(&report);

    let total: u64 = report
        .paths()
        .iter()
        .filter_map(|p| std::fs::metadata(p).ok())
        .map(|m| m.len())
        .sum();
    println!("Total size: {}", format_bytes(total));

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_overrides_apply_to_file_config() {
        let mut file = NamedTempFile::new().unwrap();
        write!(
            file,
            "[scraper]\nmax_threads = 5\nmax_notebooks = 7\nrequest_delay_secs = 0.5\n"
        )
        .unwrap();

        let params = ScrapeParams {
            config_file: Some(file.path().to_path_buf()),
            max_notebooks: Some(3),
            delay: Some(0.0),
            ..Default::default()
        };

        let config = params.resolve_config().unwrap();
        assert_eq!(config.scraper.max_threads, 5);
        assert_eq!(config.scraper.max_notebooks, 3);
        assert_eq!(config.scraper.request_delay_secs, 0.0);
    }

    #[test]
    fn test_invalid_override_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[scraper]\nmax_threads = 5\n").unwrap();

        let params = ScrapeParams {
            config_file: Some(file.path().to_path_buf()),
            max_threads: Some(0),
            ..Default::default()
        };

        assert!(params.resolve_config().is_err());
    }
}
