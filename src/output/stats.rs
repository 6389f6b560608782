//! Per-run scrape statistics
//!
//! The public result collapses "no matches" and "failed after retries" into
//! zero records; these counters keep the distinction for logs and tests.

use crate::scrape::SearchOutcome;
use std::time::Duration;

/// Scrape statistics summary
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScrapeStats {
    /// Stores returned by the directory
    pub stores_total: usize,

    /// Stores with at least one matching product
    pub stores_matched: usize,

    /// Stores searched successfully with no matches
    pub stores_empty: usize,

    /// Stores whose every attempt failed
    pub stores_failed: usize,

    /// Store tasks that panicked before reporting
    pub tasks_panicked: usize,

    /// Records appended to the sink
    pub records: usize,

    /// Wall-clock duration of the run
    pub elapsed: Duration,
}

impl ScrapeStats {
    pub fn new(stores_total: usize) -> Self {
        Self {
            stores_total,
            ..Default::default()
        }
    }

    /// Counts one store's outcome
    pub fn record_outcome(&mut self, outcome: &SearchOutcome) {
        match outcome {
            SearchOutcome::Found(products) => {
                self.stores_matched += 1;
                self.records += products.len();
            }
            SearchOutcome::NoMatches => self.stores_empty += 1,
            SearchOutcome::Failed { .. } => self.stores_failed += 1,
        }
    }

    /// Stores that reported an outcome
    pub fn stores_completed(&self) -> usize {
        self.stores_matched + self.stores_empty + self.stores_failed
    }

    /// Adds another run's counters into this one
    pub fn merge(&mut self, other: &ScrapeStats) {
        self.stores_total += other.stores_total;
        self.stores_matched += other.stores_matched;
        self.stores_empty += other.stores_empty;
        self.stores_failed += other.stores_failed;
        self.tasks_panicked += other.tasks_panicked;
        self.records += other.records;
        self.elapsed += other.elapsed;
    }
}

/// Logs statistics at info level
pub fn print_statistics(stats: &ScrapeStats) {
    tracing::info!(
        "Stores: {} total, {} with matches, {} without matches, {} failed, {} panicked",
        stats.stores_total,
        stats.stores_matched,
        stats.stores_empty,
        stats.stores_failed,
        stats.tasks_panicked
    );
    tracing::info!("Records: {} in {:.2?}", stats.records, stats.elapsed);
}
