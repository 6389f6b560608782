//! Product records produced by a scrape run

use crate::model::Store;
use serde::{Deserialize, Serialize};

/// One product name matched at one store
///
/// Field names on the wire follow the column names downstream CSV/JSON
/// consumers already expect.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductRecord {
    #[serde(rename = "Storename")]
    pub store_name: String,

    #[serde(rename = "storeFormat")]
    pub store_format: String,

    #[serde(rename = "ProductName")]
    pub product_name: String,
}

impl ProductRecord {
    pub fn new(
        store_name: impl Into<String>,
        store_format: impl Into<String>,
        product_name: impl Into<String>,
    ) -> Self {
        Self {
            store_name: store_name.into(),
            store_format: store_format.into(),
            product_name: product_name.into(),
        }
    }

    /// Builds one record per product name, all attributed to `store`
    pub fn batch_for_store(store: &Store, products: Vec<String>) -> Vec<Self> {
        products
            .into_iter()
            .map(|product_name| Self {
                store_name: store.name.clone(),
                store_format: store.format.clone(),
                product_name,
            })
            .collect()
    }
}

/// Records collected by one scrape run, in no particular order
pub type RunResult = Vec<ProductRecord>;
