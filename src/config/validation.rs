use crate::config::types::{Config, EndpointConfig, OutputConfig, ScraperConfig, SelectorConfig};
use crate::ConfigError;
use scraper::Selector;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_scraper_config(&config.scraper)?;
    validate_endpoints(&config.endpoints)?;
    validate_selectors(&config.selectors)?;
    validate_output_config(&config.output)?;

    if config.user_agent.name.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent name cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates fan-out and retry settings
fn validate_scraper_config(config: &ScraperConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > 100 {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and 100, got {}",
            config.concurrency
        )));
    }

    if config.max_retries < 1 || config.max_retries > 10 {
        return Err(ConfigError::Validation(format!(
            "max-retries must be between 1 and 10, got {}",
            config.max_retries
        )));
    }

    if config.request_timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "request-timeout-secs must be >= 1, got {}",
            config.request_timeout_secs
        )));
    }

    Ok(())
}

/// Validates the upstream URLs
fn validate_endpoints(config: &EndpointConfig) -> Result<(), ConfigError> {
    validate_http_url("store-list-url", &config.store_list_url)?;
    validate_http_url("search-base-url", &config.search_base_url)?;
    Ok(())
}

fn validate_http_url(key: &str, value: &str) -> Result<(), ConfigError> {
    let url = Url::parse(value)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid {} '{}': {}", key, value, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' must use http or https",
            key, value
        )));
    }

    if url.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "{} '{}' cannot be used as a base URL",
            key, value
        )));
    }

    Ok(())
}

/// Validates that both selectors parse
fn validate_selectors(config: &SelectorConfig) -> Result<(), ConfigError> {
    for (key, css) in [
        ("product-card", &config.product_card),
        ("product-name", &config.product_name),
    ] {
        Selector::parse(css).map_err(|e| {
            ConfigError::InvalidSelector(format!("{} '{}': {:?}", key, css, e))
        })?;
    }
    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if matches!(config.csv_path.as_deref(), Some(p) if p.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    if matches!(config.database_path.as_deref(), Some(p) if p.trim().is_empty()) {
        return Err(ConfigError::Validation(
            "database-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
