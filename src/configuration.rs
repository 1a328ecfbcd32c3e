use std::path::PathBuf;

use serde::Deserialize;
use serde_aux::field_attributes::{
    deserialize_bool_from_anything, deserialize_number_from_string,
};

const DEFAULT_BASE_URL: &str =
    "https://webscraper.io/test-sites/e-commerce/allinone/computers/laptops";

#[derive(Deserialize, Clone)]
pub struct Settings {
    pub spreadsheet: SpreadsheetSettings,
    pub scrape: ScrapeSettings,
}

#[derive(Deserialize, Clone)]
pub struct SpreadsheetSettings {
    pub spreadsheet_id: String,
    pub credentials_path: String,
}

#[derive(Deserialize, Clone)]
pub struct ScrapeSettings {
    pub base_url: String,
    pub webdriver_url: String,
    #[serde(deserialize_with = "deserialize_bool_from_anything")]
    pub headless: bool,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub target_count: usize,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub wait_timeout_secs: u64,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub settle_delay_ms: u64,
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let settings = config::Config::builder()
        .set_default("scrape.base_url", DEFAULT_BASE_URL)?
        .set_default("scrape.webdriver_url", "http://localhost:9515")?
        .set_default("scrape.headless", true)?
        .set_default("scrape.target_count", 100_i64)?
        .set_default("scrape.wait_timeout_secs", 10_i64)?
        .set_default("scrape.settle_delay_ms", 1000_i64)?
        // APP_SPREADSHEET__SPREADSHEET_ID, APP_SCRAPE__TARGET_COUNT, ...
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("Credentials file not found: {}", .0.display())]
    CredentialsNotFound(PathBuf),
    #[error("Failed to read credentials file: {0}")]
    CredentialsRead(#[from] std::io::Error),
    #[error("Invalid credentials file: {0}")]
    CredentialsParse(#[from] serde_json::Error),
}
