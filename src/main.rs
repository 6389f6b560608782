//! Shelf-Scout main entry point
//!
//! This is the command-line interface for the Shelf-Scout product scraper.

use anyhow::Context;
use clap::Parser;
use shelf_scout::batch::{parse_search_terms, scrape_terms, ScrapeResponse};
use shelf_scout::config::{load_config_with_hash, validate, Config};
use shelf_scout::output::{open_writers, print_statistics};
use shelf_scout::{Scraper, SearchTerm};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Shelf-Scout: find which stores carry a product
///
/// Fetches the chain's store directory, searches every store for each
/// product in the list and prints the matches as JSON. Matches can also be
/// appended to a CSV file and/or a SQLite database as they arrive.
#[derive(Parser, Debug)]
#[command(name = "shelf-scout")]
#[command(version)]
#[command(about = "Store-by-store product availability scraper", long_about = None)]
struct Cli {
    /// Path to TOML configuration file (built-in defaults when omitted)
    #[arg(value_name = "CONFIG")]
    config: Option<PathBuf>,

    /// Comma-separated list of products to search for
    #[arg(short, long, env = "SHELF_SCOUT_PRODUCTS")]
    products: Option<String>,

    /// Maximum number of store searches in flight
    #[arg(long, env = "SHELF_SCOUT_CONCURRENCY")]
    concurrency: Option<usize>,

    /// Attempts per store search, including the first
    #[arg(long, env = "SHELF_SCOUT_MAX_RETRIES")]
    max_retries: Option<u32>,

    /// Backoff unit in milliseconds (attempt n waits n * delay)
    #[arg(long, env = "SHELF_SCOUT_BASE_DELAY_MS")]
    base_delay_ms: Option<u64>,

    /// Append matches to this CSV file
    #[arg(long, value_name = "PATH")]
    csv: Option<String>,

    /// Record matches in this SQLite database
    #[arg(long, value_name = "PATH")]
    database: Option<String>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,

    /// Show the effective configuration and terms without scraping
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let (mut config, config_hash) = load_configuration(cli.config.as_deref())?;
    apply_overrides(&mut config, &cli);
    validate(&config).context("Invalid configuration after command-line overrides")?;

    let terms = parse_search_terms(cli.products.as_deref())?;

    if cli.dry_run {
        handle_dry_run(&config, &terms);
        return Ok(());
    }

    handle_scrape(&config, &config_hash, &terms).await
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("shelf_scout=info,warn"),
            1 => EnvFilter::new("shelf_scout=debug,info"),
            2 => EnvFilter::new("shelf_scout=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    // Logs go to stderr so stdout carries only the JSON response
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}

/// Loads the config file if one was given, otherwise the defaults
fn load_configuration(path: Option<&Path>) -> anyhow::Result<(Config, String)> {
    match path {
        Some(path) => {
            tracing::info!("Loading configuration from: {}", path.display());
            let (config, hash) = load_config_with_hash(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?;
            tracing::info!("Configuration loaded successfully (hash: {})", hash);
            Ok((config, hash))
        }
        None => {
            tracing::debug!("No configuration file given, using defaults");
            Ok((Config::default(), "default".to_string()))
        }
    }
}

/// Applies command-line and environment overrides on top of the file
fn apply_overrides(config: &mut Config, cli: &Cli) {
    if let Some(concurrency) = cli.concurrency {
        config.scraper.concurrency = concurrency;
    }
    if let Some(max_retries) = cli.max_retries {
        config.scraper.max_retries = max_retries;
    }
    if let Some(base_delay_ms) = cli.base_delay_ms {
        config.scraper.base_delay_ms = base_delay_ms;
    }
    if let Some(csv) = &cli.csv {
        config.output.csv_path = Some(csv.clone());
    }
    if let Some(database) = &cli.database {
        config.output.database_path = Some(database.clone());
    }
}

/// Handles the --dry-run mode
fn handle_dry_run(config: &Config, terms: &[SearchTerm]) {
    println!("=== Shelf-Scout Dry Run ===\n");

    println!("Scraper Configuration:");
    println!("  Concurrency: {}", config.scraper.concurrency);
    println!("  Max retries: {}", config.scraper.max_retries);
    println!("  Base delay: {}ms", config.scraper.base_delay_ms);
    println!("  Request timeout: {}s", config.scraper.request_timeout_secs);

    println!("\nEndpoints:");
    println!("  Store list: {}", config.endpoints.store_list_url);
    println!("  Search base: {}", config.endpoints.search_base_url);

    println!("\nSelectors:");
    println!("  Product card: {}", config.selectors.product_card);
    println!("  Product name: {}", config.selectors.product_name);

    println!("\nOutput:");
    println!(
        "  CSV: {}",
        config.output.csv_path.as_deref().unwrap_or("(none)")
    );
    println!(
        "  Database: {}",
        config.output.database_path.as_deref().unwrap_or("(none)")
    );

    println!("\nSearch Terms ({}):", terms.len());
    for term in terms {
        println!("  - {}", term);
    }

    println!("\n✓ Configuration is valid");
}

/// Handles the main scrape operation
async fn handle_scrape(config: &Config, config_hash: &str, terms: &[SearchTerm]) -> anyhow::Result<()> {
    let scraper = Scraper::from_config(config).context("Failed to set up scraper")?;
    let writer = open_writers(&config.output, config_hash, terms)
        .context("Failed to open output")?;

    tracing::info!("Searching for {} term(s)", terms.len());
    let report = scrape_terms(&scraper, terms, writer.clone()).await;

    if let Some(writer) = writer {
        let finished = match writer.lock() {
            Ok(mut writer) => writer.finish().map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };
        if let Err(e) = finished {
            tracing::warn!("Failed to finalize output: {}", e);
        }
    }

    print_statistics(&report.stats);

    let response = ScrapeResponse::completed(report.records);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
