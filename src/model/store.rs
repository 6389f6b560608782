//! Store directory entries and search terms

use crate::ScoutError;
use serde::{Deserialize, Deserializer};
use std::fmt;

/// A single store location from the directory
///
/// Decoded from the upstream JSON; only the fields the scraper needs are kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Store {
    /// Identifier addressing the store's search endpoint
    #[serde(rename = "accountId", deserialize_with = "deserialize_store_id")]
    pub id: String,

    /// Human-readable store name
    pub name: String,

    /// Store category (e.g. "Supermarket", "Express")
    #[serde(rename = "storeFormat", default)]
    pub format: String,
}

impl Store {
    pub fn new(id: impl Into<String>, name: impl Into<String>, format: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            format: format.into(),
        }
    }
}

/// The directory reports account ids as numbers for some stores and as
/// strings for others.
fn deserialize_store_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Unsigned(u64),
        Signed(i64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(s) => s,
        RawId::Unsigned(n) => n.to_string(),
        RawId::Signed(n) => n.to_string(),
    })
}

/// A trimmed, non-empty search query
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Creates a search term, trimming surrounding whitespace
    ///
    /// # Returns
    ///
    /// * `Ok(SearchTerm)` - The trimmed term
    /// * `Err(ScoutError::InvalidSearchTerm)` - The input was blank
    pub fn new(raw: &str) -> Result<Self, ScoutError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ScoutError::InvalidSearchTerm(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SearchTerm {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
