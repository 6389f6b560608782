//! Shelf-Scout: a store-by-store product availability scraper
//!
//! This crate looks up a search term at every store in a retail chain's store
//! directory, one bounded-concurrency request per store, and collects the
//! matching product names into flat records for CSV/SQLite/JSON consumers.

pub mod batch;
pub mod config;
pub mod model;
pub mod output;
pub mod scrape;

use thiserror::Error;

/// Main error type for Shelf-Scout operations
#[derive(Debug, Error)]
pub enum ScoutError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("HTTP error for {url}: {source}")]
    Http { url: String, source: reqwest::Error },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("URL parse error: {0}")]
    UrlParse(#[from] ::url::ParseError),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Invalid search term: {0:?}")]
    InvalidSearchTerm(String),

    #[error("Please provide a product list")]
    MissingSearchTerms,

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid CSS selector in config: {0}")]
    InvalidSelector(String),
}

/// Result type alias for Shelf-Scout operations
pub type Result<T> = std::result::Result<T, ScoutError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use model::{ProductRecord, RunResult, SearchTerm, Store};
pub use output::{ResultSink, ScrapeStats};
pub use scrape::{ConcurrencyLimiter, ProductSearchClient, Scraper, SearchOutcome, StoreDirectoryClient};
