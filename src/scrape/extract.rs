//! HTML product-name extraction
//!
//! Locates product cards in a store's search results page and reads the
//! name label inside each card.

use crate::config::SelectorConfig;
use crate::ConfigError;
use scraper::{Html, Selector};

/// Extracts product names from search result markup
#[derive(Debug, Clone)]
pub struct ProductExtractor {
    card: Selector,
    name: Selector,
}

impl ProductExtractor {
    /// Builds an extractor from CSS selectors
    ///
    /// # Arguments
    ///
    /// * `card` - Selector for the element wrapping a single product
    /// * `name` - Selector, relative to the card, for the product name label
    pub fn new(card: &str, name: &str) -> Result<Self, ConfigError> {
        let card = Selector::parse(card)
            .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", card, e)))?;
        let name = Selector::parse(name)
            .map_err(|e| ConfigError::InvalidSelector(format!("'{}': {:?}", name, e)))?;
        Ok(Self { card, name })
    }

    pub fn from_config(config: &SelectorConfig) -> Result<Self, ConfigError> {
        Self::new(&config.product_card, &config.product_name)
    }

    /// Returns the trimmed product names found in `html`, in document order
    ///
    /// Cards without a name, or with only whitespace, are skipped. Names are
    /// not de-duplicated.
    ///
    /// # Example
    ///
    /// ```
    /// use shelf_scout::scrape::ProductExtractor;
    ///
    /// let extractor = ProductExtractor::new("div.card", "h3").unwrap();
    /// let html = r#"<div class="card"><h3> Milk 1L </h3></div>"#;
    /// assert_eq!(extractor.extract(html), vec!["Milk 1L".to_string()]);
    /// ```
    pub fn extract(&self, html: &str) -> Vec<String> {
        let document = Html::parse_document(html);

        document
            .select(&self.card)
            .filter_map(|card| {
                let text: String = card
                    .select(&self.name)
                    .flat_map(|label| label.text())
                    .collect();
                let trimmed = text.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            })
            .collect()
    }
}
