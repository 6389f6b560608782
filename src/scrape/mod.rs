//! Scrape module: the concurrent fetch-and-aggregate engine
//!
//! This module contains:
//! - Store directory fetching
//! - Per-store product search with retry and linear backoff
//! - HTML product-name extraction
//! - The concurrency limiter gating searches
//! - The coordinator fanning out one task per store

mod client;
mod coordinator;
mod directory;
mod extract;
mod limiter;
mod search;

pub use client::build_http_client;
pub use coordinator::{run_scrape, ScrapeReport, Scraper};
pub use directory::StoreDirectoryClient;
pub use extract::ProductExtractor;
pub use limiter::{ConcurrencyLimiter, DEFAULT_CAPACITY};
pub use search::{ProductSearchClient, RetryPolicy, SearchOutcome};
