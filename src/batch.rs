//! Multi-term batches
//!
//! Accepts a comma-separated product list, runs one independent scrape per
//! term (in order) and concatenates the results into the response shape
//! downstream consumers read.

use crate::model::{ProductRecord, SearchTerm};
use crate::output::{ResultSink, SharedWriter};
use crate::scrape::{ScrapeReport, Scraper};
use crate::ScoutError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Aggregated response for a batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeResponse {
    pub message: String,
    pub results: Vec<ProductRecord>,
}

impl ScrapeResponse {
    pub fn completed(results: Vec<ProductRecord>) -> Self {
        Self {
            message: "Scraping completed".to_string(),
            results,
        }
    }
}

/// Splits a comma-separated product list into search terms
///
/// Pieces are trimmed and blank pieces dropped.
///
/// # Returns
///
/// * `Ok(Vec<SearchTerm>)` - At least one term
/// * `Err(ScoutError::MissingSearchTerms)` - No list, or nothing but blanks
pub fn parse_search_terms(raw: Option<&str>) -> Result<Vec<SearchTerm>, ScoutError> {
    let terms: Vec<SearchTerm> = raw
        .unwrap_or_default()
        .split(',')
        .filter_map(|piece| SearchTerm::new(piece).ok())
        .collect();

    if terms.is_empty() {
        return Err(ScoutError::MissingSearchTerms);
    }

    Ok(terms)
}

/// Scrapes each term in turn and concatenates the results
///
/// Each term gets its own `ResultSink`; when `writer` is set, every sink
/// forwards its batches to it as they arrive.
pub async fn scrape_terms(
    scraper: &Scraper,
    terms: &[SearchTerm],
    writer: Option<SharedWriter>,
) -> ScrapeReport {
    let mut combined = ScrapeReport::default();

    for term in terms {
        let sink = match &writer {
            Some(writer) => ResultSink::with_writer(Arc::clone(writer), term.clone()),
            None => ResultSink::new(),
        };

        let report = scraper.scrape_into(term, Arc::new(sink)).await;
        combined.records.extend(report.records);
        combined.stats.merge(&report.stats);
    }

    combined
}
