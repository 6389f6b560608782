//! Per-store product search with retry
//!
//! # Retry Logic
//!
//! | Condition | Action |
//! |-----------|--------|
//! | 2xx, products found | Done → `Found` |
//! | 2xx, no products | Done → `NoMatches` (not retried) |
//! | Non-2xx status | Retry after `base_delay * attempt` |
//! | Timeout / connection error | Retry after `base_delay * attempt` |
//! | Unreadable body | Retry after `base_delay * attempt` |
//! | Attempts exhausted | `Failed`, logged, never propagated |

use crate::config::ScraperConfig;
use crate::model::SearchTerm;
use crate::scrape::extract::ProductExtractor;
use crate::ScoutError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Result of searching a single store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// At least one product name was extracted
    Found(Vec<String>),

    /// The search page loaded but contained no products
    NoMatches,

    /// Every attempt failed
    Failed {
        /// Attempts made, including the first
        attempts: u32,
        /// Description of the last failure
        error: String,
    },
}

impl SearchOutcome {
    /// Collapses the outcome to the product names, empty unless `Found`
    pub fn into_products(self) -> Vec<String> {
        match self {
            SearchOutcome::Found(products) => products,
            SearchOutcome::NoMatches | SearchOutcome::Failed { .. } => Vec::new(),
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, SearchOutcome::Failed { .. })
    }
}

/// How many times to try a store, and how long to wait between tries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first; treated as at least 1
    pub max_attempts: u32,

    /// Delay unit for the linear backoff
    pub base_delay: Duration,
}

impl RetryPolicy {
    pub fn from_config(config: &ScraperConfig) -> Self {
        Self {
            max_attempts: config.max_retries,
            base_delay: Duration::from_millis(config.base_delay_ms),
        }
    }

    /// Delay after failed attempt number `attempt` (1-based)
    pub fn delay_for(&self, attempt: u32) -> Duration {
        self.base_delay * attempt
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::from_config(&ScraperConfig::default())
    }
}

/// Fetches a store's search page and extracts the matching product names
#[derive(Debug, Clone)]
pub struct ProductSearchClient {
    client: Client,
    base_url: Url,
    extractor: ProductExtractor,
    retry: RetryPolicy,
}

impl ProductSearchClient {
    /// Creates a search client
    ///
    /// # Arguments
    ///
    /// * `client` - HTTP client to issue requests with
    /// * `base_url` - Base that `/stores/{id}/search` is appended to
    /// * `extractor` - Pulls product names out of the result page
    /// * `retry` - Attempt count and backoff
    pub fn new(
        client: Client,
        base_url: &str,
        extractor: ProductExtractor,
        retry: RetryPolicy,
    ) -> Result<Self, ScoutError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ScoutError::UrlParse(
                url::ParseError::RelativeUrlWithCannotBeABaseBase,
            ));
        }

        Ok(Self {
            client,
            base_url,
            extractor,
            retry,
        })
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Builds `{base}/stores/{store_id}/search?q={term}`
    pub fn search_url(&self, store_id: &str, term: &SearchTerm) -> Url {
        let mut url = self.base_url.clone();
        url.set_query(None);
        url.set_fragment(None);

        // Always succeeds: `new` rejects cannot-be-a-base URLs
        if let Ok(mut segments) = url.path_segments_mut() {
            segments
                .pop_if_empty()
                .extend(["stores", store_id, "search"]);
        }

        url.query_pairs_mut().append_pair("q", term.as_str());
        url
    }

    /// Searches one store, returning its product names
    ///
    /// Never fails: an empty list means either "no matches" or "every
    /// attempt failed". Use [`search`](Self::search) to tell them apart.
    pub async fn fetch_products(&self, store_id: &str, term: &SearchTerm) -> Vec<String> {
        self.search(store_id, term).await.into_products()
    }

    /// Searches one store, retrying transient failures with linear backoff
    pub async fn search(&self, store_id: &str, term: &SearchTerm) -> SearchOutcome {
        let url = self.search_url(store_id, term);
        let max_attempts = self.retry.max_attempts.max(1);
        let mut attempt = 1;

        loop {
            match self.attempt(&url).await {
                Ok(products) if products.is_empty() => {
                    tracing::debug!("No products matching '{}' at store {}", term, store_id);
                    return SearchOutcome::NoMatches;
                }
                Ok(products) => {
                    tracing::debug!(
                        "Found {} products matching '{}' at store {}",
                        products.len(),
                        term,
                        store_id
                    );
                    return SearchOutcome::Found(products);
                }
                Err(e) => {
                    tracing::warn!(
                        "Error fetching products for store {} (Attempt {}/{}): {}",
                        store_id,
                        attempt,
                        max_attempts,
                        e
                    );

                    if attempt >= max_attempts {
                        tracing::error!(
                            "Giving up on store {} after {} attempts",
                            store_id,
                            attempt
                        );
                        return SearchOutcome::Failed {
                            attempts: attempt,
                            error: e.to_string(),
                        };
                    }

                    tokio::time::sleep(self.retry.delay_for(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }

    /// Makes a single request and extracts product names from the response
    async fn attempt(&self, url: &Url) -> Result<Vec<String>, ScoutError> {
        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|source| ScoutError::Http {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await.map_err(|e| ScoutError::Decode {
            url: url.to_string(),
            message: e.to_string(),
        })?;

        Ok(self.extractor.extract(&body))
    }
}
