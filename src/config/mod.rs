//! Configuration module for Shelf-Scout
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//!
//! # Example
//!
//! ```no_run
//! use shelf_scout::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("shelf-scout.toml")).unwrap();
//! println!("Concurrency: {}", config.scraper.concurrency);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{
    Config, EndpointConfig, OutputConfig, ScraperConfig, SelectorConfig, UserAgentConfig,
    DEFAULT_PRODUCT_CARD_SELECTOR, DEFAULT_PRODUCT_NAME_SELECTOR, DEFAULT_SEARCH_BASE_URL,
    DEFAULT_STORE_LIST_URL,
};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
