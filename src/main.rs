//! Asset-Crawler main entry point
//!
//! This is the command-line interface for the same-host asset crawler.

use anyhow::Context;
use asset_crawler::config::{load_config_with_hash, validate, Config};
use asset_crawler::crawler::Coordinator;
use asset_crawler::output::{print_statistics, save_results, to_json, CrawlStatistics};
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// Asset-Crawler: a same-host breadth-first crawler
///
/// Crawls a website from WEBSITE, staying on its host, and prints for every
/// visited page the static assets it links to, as JSON.
#[derive(Parser, Debug)]
#[command(name = "asset-crawler")]
#[command(version)]
#[command(about = "Crawl a website and list the static assets of each page", long_about = None)]
struct Cli {
    /// Start URL; also fixes the host the crawl stays on
    #[arg(value_name = "WEBSITE")]
    website: String,

    /// Maximum number of pages to visit
    #[arg(short, long, allow_negative_numbers = true)]
    max_pages: Option<i64>,

    /// Also write the JSON result to this file
    #[arg(short, long, value_name = "PATH")]
    save: Option<PathBuf>,

    /// Path to TOML configuration file
    #[arg(short, long, value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Indent the JSON output
    #[arg(long)]
    pretty: bool,

    /// Increase logging verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging based on verbosity
    setup_logging(cli.verbose, cli.quiet);

    let config = resolve_config(&cli)?;

    let coordinator =
        Coordinator::from_config(&config).context("Failed to build the HTTP client")?;

    let start_time = Instant::now();
    let report = coordinator
        .crawl_with_report(&cli.website, config.crawler.max_pages)
        .await
        .with_context(|| format!("Crawl of {} could not start", cli.website))?;
    let elapsed = start_time.elapsed();

    let json = to_json(&report.records, config.output.pretty)?;
    println!(
        "Result of the crawling for {} returned in {:.2} seconds:",
        cli.website,
        elapsed.as_secs_f64()
    );
    println!("{}", json);

    if let Some(path) = &config.output.path {
        save_results(Path::new(path), &report.records, config.output.pretty)
            .with_context(|| format!("Failed to write results to {}", path))?;
        tracing::info!("Results saved to {}", path);
    }

    if cli.verbose > 0 {
        print_statistics(&CrawlStatistics::from_report(&report));
    }

    Ok(())
}

/// Sets up the logging/tracing subscriber based on verbosity level
///
/// Logs go to stderr so stdout carries only the result.
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("asset_crawler=info,warn"),
            1 => EnvFilter::new("asset_crawler=debug,info"),
            _ => EnvFilter::new("asset_crawler=trace,debug"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the optional config file and applies command-line overrides
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = match &cli.config {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            config
        }
        None => Config::default(),
    };

    if let Some(max_pages) = cli.max_pages {
        config.crawler.max_pages = max_pages;
    }
    if let Some(save) = &cli.save {
        config.output.path = Some(save.display().to_string());
    }
    if cli.pretty {
        config.output.pretty = true;
    }

    validate(&config).context("Invalid settings")?;
    Ok(config)
}
