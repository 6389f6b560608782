//! HTTP client construction

use crate::config::{ScraperConfig, UserAgentConfig};
use reqwest::Client;
use std::time::Duration;

/// Builds the HTTP client shared by the directory and search clients
///
/// # Arguments
///
/// * `user_agent` - Identification sent with every request
/// * `scraper` - Supplies the per-request timeout
pub fn build_http_client(
    user_agent: &UserAgentConfig,
    scraper: &ScraperConfig,
) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(user_agent.header_value())
        .timeout(Duration::from_secs(scraper.request_timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .gzip(true)
        .brotli(true)
        .build()
}
