use serde::Deserialize;

/// Store directory endpoint used when no config overrides it
pub const DEFAULT_STORE_LIST_URL: &str =
    "https://handla.ica.se/api/store/v1?&customerType=B2C&deliveryMethods=PICKUP,HOME_DELIVERY";

/// Base URL the per-store search path is appended to
pub const DEFAULT_SEARCH_BASE_URL: &str = "https://handlaprivatkund.ica.se";

/// Container element wrapping a single product in the search results
pub const DEFAULT_PRODUCT_CARD_SELECTOR: &str = "div.product-card-container";

/// Product name label inside a product card
pub const DEFAULT_PRODUCT_NAME_SELECTOR: &str = "h3._text_f6lbl_1._text--m_f6lbl_23";

/// Main configuration structure for Shelf-Scout
///
/// Every section is optional in the TOML file; missing sections and keys fall
/// back to the defaults below.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub scraper: ScraperConfig,
    pub endpoints: EndpointConfig,
    pub selectors: SelectorConfig,
    #[serde(rename = "user-agent")]
    pub user_agent: UserAgentConfig,
    pub output: OutputConfig,
}

/// Fan-out and retry behavior
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ScraperConfig {
    /// Maximum number of store searches in flight at once
    pub concurrency: usize,

    /// Attempts per store search, including the first one
    pub max_retries: u32,

    /// Backoff unit; attempt `n` waits `n * base_delay_ms` before retrying
    pub base_delay_ms: u64,

    /// Per-request HTTP timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            concurrency: 5,
            max_retries: 3,
            base_delay_ms: 1000,
            request_timeout_secs: 30,
        }
    }
}

/// Upstream service locations
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct EndpointConfig {
    /// URL returning the JSON store directory
    pub store_list_url: String,

    /// Base URL for `/stores/{id}/search?q=...`
    pub search_base_url: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            store_list_url: DEFAULT_STORE_LIST_URL.to_string(),
            search_base_url: DEFAULT_SEARCH_BASE_URL.to_string(),
        }
    }
}

/// CSS selectors used to pull product names out of a search page
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct SelectorConfig {
    pub product_card: String,
    pub product_name: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            product_card: DEFAULT_PRODUCT_CARD_SELECTOR.to_string(),
            product_name: DEFAULT_PRODUCT_NAME_SELECTOR.to_string(),
        }
    }
}

/// User agent identification
#[derive(Debug, Clone, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct UserAgentConfig {
    pub name: String,
    pub version: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            name: "shelf-scout".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl UserAgentConfig {
    /// Formats the `User-Agent` header value
    pub fn header_value(&self) -> String {
        format!("{}/{}", self.name, self.version)
    }
}

/// Durable output destinations; both are optional
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct OutputConfig {
    /// Append-only CSV file
    pub csv_path: Option<String>,

    /// SQLite database file
    pub database_path: Option<String>,
}
