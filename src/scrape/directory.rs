//! Store directory client

use crate::model::Store;
use crate::ScoutError;
use reqwest::Client;

/// Fetches the list of stores to search
#[derive(Debug, Clone)]
pub struct StoreDirectoryClient {
    client: Client,
    url: String,
}

impl StoreDirectoryClient {
    pub fn new(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Fetches the current store directory
    ///
    /// Any transport, status or decoding failure is logged and yields an
    /// empty list; the request is not retried.
    pub async fn fetch_stores(&self) -> Vec<Store> {
        match self.try_fetch_stores().await {
            Ok(stores) => {
                tracing::info!("Fetched {} stores from directory", stores.len());
                stores
            }
            Err(e) => {
                tracing::error!("Error fetching store list: {}", e);
                Vec::new()
            }
        }
    }

    async fn try_fetch_stores(&self) -> Result<Vec<Store>, ScoutError> {
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|source| ScoutError::Http {
                url: self.url.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoutError::Status {
                url: self.url.clone(),
                status: status.as_u16(),
            });
        }

        response
            .json::<Vec<Store>>()
            .await
            .map_err(|e| ScoutError::Decode {
                url: self.url.clone(),
                message: e.to_string(),
            })
    }
}
