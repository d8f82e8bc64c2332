mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use commands::ScrapeParams;
use kaggle_harvest::config::Config;

#[derive(Parser)]
#[command(
    name = "kaggle-harvest",
    version,
    about = "Scrape a Kaggle competition's overview, discussions and notebooks",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Log format (text, json); defaults to the configured format
    #[arg(long, global = true)]
    log_format: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Scrape a competition and write JSON, Markdown and CSV reports
    Scrape {
        /// Competition URL, e.g. https://www.kaggle.com/competitions/titanic
        url: String,

        /// Output directory
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// TOML configuration file (defaults to KAGGLE_HARVEST_* variables)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Maximum number of discussion threads
        #[arg(long)]
        max_threads: Option<usize>,

        /// Maximum number of notebooks
        #[arg(long)]
        max_notebooks: Option<usize>,

        /// Maximum number of posts per thread
        #[arg(long)]
        max_posts: Option<usize>,

        /// Seconds to wait between requests
        #[arg(long)]
        delay: Option<f64>,

        /// User-Agent header for page requests
        #[arg(long)]
        user_agent: Option<String>,

        /// Handlebars template for the Markdown report
        #[arg(long)]
        template: Option<PathBuf>,

        /// Skip the CSV tables
        #[arg(long, default_value = "false")]
        no_csv: bool,
    },

    /// Re-render reports from a saved <slug>_data.json file
    Render {
        /// JSON file written by `scrape`
        input: PathBuf,

        /// Output directory (defaults to the input file's directory)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Handlebars template for the Markdown report
        #[arg(long)]
        template: Option<PathBuf>,

        /// Skip the CSV tables
        #[arg(long, default_value = "false")]
        no_csv: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let logging = match &cli.command {
        Commands::Scrape {
            config: Some(path), ..
        } => Config::from_file(path),
        _ => Config::from_env(),
    }
    .map(|config| config.logging)
    .unwrap_or_default();

    let format = cli.log_format.as_deref().unwrap_or(&logging.format);
    let level = if cli.verbose { "debug" } else { logging.level.as_str() };
    setup_tracing(format, level)?;

    match cli.command {
        Commands::Scrape {
            url,
            output,
            config,
            max_threads,
            max_notebooks,
            max_posts,
            delay,
            user_agent,
            template,
            no_csv,
        } => {
            tracing::info!(
                url = %url,
                output = %output.display(),
                config = ?config,
                "Starting scrape command"
            );
            commands::scrape(ScrapeParams {
                url,
                output,
                config_file: config,
                max_threads,
                max_notebooks,
                max_posts,
                delay,
                user_agent,
                template,
                no_csv,
            })
            .await?;
        }

        Commands::Render {
            input,
            output,
            template,
            no_csv,
        } => {
            tracing::info!(input = %input.display(), "Starting render command");
            commands::render(input, output, template, no_csv).await?;
        }
    }

    Ok(())
}

fn setup_tracing(format: &str, level: &str) -> Result<()> {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!("kaggle_harvest={level},warn"))
    });

    match format {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        "text" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
                .init();
        }
        other => anyhow::bail!("Unknown log format: {other} (expected text or json)"),
    }

    Ok(())
}
