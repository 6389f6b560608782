//! Scrape coordinator - fan-out and aggregation
//!
//! One scrape run:
//! 1. Fetch the store directory (once, no retry)
//! 2. Spawn one task per store, each gated by the `ConcurrencyLimiter`
//! 3. Each task searches its store and appends any matches to the `ResultSink`
//! 4. Join every task, then drain the sink
//!
//! No store can fail the run: searches never return errors, and a panicked
//! task is logged and counted.

use crate::config::Config;
use crate::model::{ProductRecord, RunResult, SearchTerm};
use crate::output::{ResultSink, ScrapeStats};
use crate::scrape::client::build_http_client;
use crate::scrape::directory::StoreDirectoryClient;
use crate::scrape::extract::ProductExtractor;
use crate::scrape::limiter::ConcurrencyLimiter;
use crate::scrape::search::{ProductSearchClient, RetryPolicy, SearchOutcome};
use crate::ScoutError;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;

/// Records and statistics from one scrape run
#[derive(Debug, Clone, Default)]
pub struct ScrapeReport {
    pub records: RunResult,
    pub stats: ScrapeStats,
}

/// Main scrape coordinator
pub struct Scraper {
    directory: StoreDirectoryClient,
    search: Arc<ProductSearchClient>,
    limiter: ConcurrencyLimiter,
}

impl Scraper {
    pub fn new(
        directory: StoreDirectoryClient,
        search: ProductSearchClient,
        limiter: ConcurrencyLimiter,
    ) -> Self {
        Self {
            directory,
            search: Arc::new(search),
            limiter,
        }
    }

    /// Builds the HTTP client and every component from configuration
    pub fn from_config(config: &Config) -> Result<Self, ScoutError> {
        let client = build_http_client(&config.user_agent, &config.scraper)?;

        let directory =
            StoreDirectoryClient::new(client.clone(), &config.endpoints.store_list_url);
        let search = ProductSearchClient::new(
            client,
            &config.endpoints.search_base_url,
            ProductExtractor::from_config(&config.selectors)?,
            RetryPolicy::from_config(&config.scraper),
        )?;
        let limiter = ConcurrencyLimiter::new(config.scraper.concurrency);

        Ok(Self::new(directory, search, limiter))
    }

    pub fn limiter(&self) -> &ConcurrencyLimiter {
        &self.limiter
    }

    /// Searches every store for `term` and returns all matches
    pub async fn scrape(&self, term: &SearchTerm) -> RunResult {
        self.scrape_into(term, Arc::new(ResultSink::new()))
            .await
            .records
    }

    /// Searches every store for `term`, appending matches to `sink`
    ///
    /// Every store in the directory is attempted; there is no early return
    /// and no deadline. The returned records are whatever `sink` holds once
    /// all store tasks have finished.
    pub async fn scrape_into(&self, term: &SearchTerm, sink: Arc<ResultSink>) -> ScrapeReport {
        let started = Instant::now();

        let stores = self.directory.fetch_stores().await;
        let total = stores.len();
        let mut stats = ScrapeStats::new(total);

        if stores.is_empty() {
            tracing::warn!("No stores to search for '{}'", term);
            stats.elapsed = started.elapsed();
            return ScrapeReport {
                records: RunResult::new(),
                stats,
            };
        }

        tracing::info!(
            "Starting scraping of {} stores for '{}' ({} at a time)",
            total,
            term,
            self.limiter.capacity()
        );

        let mut tasks = JoinSet::new();
        for (index, store) in stores.into_iter().enumerate() {
            let search = Arc::clone(&self.search);
            let limiter = self.limiter.clone();
            let sink = Arc::clone(&sink);
            let term = term.clone();

            tasks.spawn(async move {
                let outcome = limiter
                    .run(async {
                        tracing::info!("{} ({} of {})", store.name, index + 1, total);
                        search.search(&store.id, &term).await
                    })
                    .await;

                if let SearchOutcome::Found(products) = &outcome {
                    sink.append(ProductRecord::batch_for_store(&store, products.clone()));
                }

                outcome
            });
        }

        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(outcome) => stats.record_outcome(&outcome),
                Err(e) => {
                    tracing::error!("Store task ended abnormally: {}", e);
                    stats.tasks_panicked += 1;
                }
            }
        }

        let records = sink.drain();
        stats.elapsed = started.elapsed();

        tracing::info!(
            "Scraping completed for '{}': {} records from {} of {} stores",
            term,
            records.len(),
            stats.stores_matched,
            total
        );

        ScrapeReport { records, stats }
    }
}

/// Runs a single scrape with a scraper built from `config`
///
/// # Example
///
/// ```no_run
/// use shelf_scout::config::Config;
/// use shelf_scout::scrape::run_scrape;
/// use shelf_scout::SearchTerm;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let records = run_scrape(&Config::default(), &SearchTerm::new("Coca Cola")?).await?;
/// println!("{} matches", records.len());
/// # Ok(())
/// # }
/// ```
pub async fn run_scrape(config: &Config, term: &SearchTerm) -> Result<RunResult, ScoutError> {
    let scraper = Scraper::from_config(config)?;
    Ok(scraper.scrape(term).await)
}
