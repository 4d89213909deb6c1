//! Tracker configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honoured for local runs.

use crate::services::search::{DEFAULT_CATEGORY_ID, DEFAULT_CONDITION_ID};
use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_OAUTH_URL: &str = "https://api.ebay.com/identity/v1/oauth2/token";
pub const DEFAULT_BROWSE_API_URL: &str = "https://api.ebay.com/buy/browse/v1/item_summary/search";
pub const DEFAULT_MARKETPLACE: &str = "EBAY_GB";
pub const DEFAULT_SEARCH_LIMIT: u32 = 50;

/// Tracker configuration, loaded once at startup.
#[derive(Clone)]
pub struct Config {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret
    pub client_secret: String,
    /// Marketplace scope polled by the binary
    pub marketplace: String,
    /// Directory holding one cursor file per marketplace
    pub cursor_dir: PathBuf,
    pub search_limit: u32,
    pub category_id: String,
    pub condition_id: String,
    pub oauth_url: String,
    pub browse_api_url: String,
    pub auth_timeout: Duration,
    pub search_timeout: Duration,
    /// Zero means poll once and exit.
    pub poll_interval: Duration,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("marketplace", &self.marketplace)
            .field("cursor_dir", &self.cursor_dir)
            .field("search_limit", &self.search_limit)
            .field("category_id", &self.category_id)
            .field("condition_id", &self.condition_id)
            .field("oauth_url", &self.oauth_url)
            .field("browse_api_url", &self.browse_api_url)
            .field("auth_timeout", &self.auth_timeout)
            .field("search_timeout", &self.search_timeout)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            client_id: env::var("EBAY_CLIENT_ID")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("EBAY_CLIENT_ID"))?,
            client_secret: env::var("EBAY_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("EBAY_CLIENT_SECRET"))?,
            marketplace: env::var("MARKETPLACE_ID")
                .unwrap_or_else(|_| DEFAULT_MARKETPLACE.to_string()),
            cursor_dir: env::var("CURSOR_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(".")),
            search_limit: parse_or("SEARCH_LIMIT", DEFAULT_SEARCH_LIMIT),
            category_id: env::var("SEARCH_CATEGORY_ID")
                .unwrap_or_else(|_| DEFAULT_CATEGORY_ID.to_string()),
            condition_id: env::var("SEARCH_CONDITION_ID")
                .unwrap_or_else(|_| DEFAULT_CONDITION_ID.to_string()),
            oauth_url: env::var("OAUTH_URL").unwrap_or_else(|_| DEFAULT_OAUTH_URL.to_string()),
            browse_api_url: env::var("BROWSE_API_URL")
                .unwrap_or_else(|_| DEFAULT_BROWSE_API_URL.to_string()),
            auth_timeout: Duration::from_secs(parse_or("AUTH_TIMEOUT_SECS", 10)),
            search_timeout: Duration::from_secs(parse_or("SEARCH_TIMEOUT_SECS", 15)),
            poll_interval: Duration::from_secs(parse_or("POLL_INTERVAL_SECS", 300)),
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            client_id: "test_client_id".to_string(),
            client_secret: "test_secret".to_string(),
            marketplace: DEFAULT_MARKETPLACE.to_string(),
            cursor_dir: PathBuf::from("."),
            search_limit: DEFAULT_SEARCH_LIMIT,
            category_id: DEFAULT_CATEGORY_ID.to_string(),
            condition_id: DEFAULT_CONDITION_ID.to_string(),
            oauth_url: "http://127.0.0.1:9/identity/v1/oauth2/token".to_string(),
            browse_api_url: "http://127.0.0.1:9/buy/browse/v1/item_summary/search".to_string(),
            auth_timeout: Duration::from_secs(10),
            search_timeout: Duration::from_secs(15),
            poll_interval: Duration::ZERO,
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
