//! Configuration file handling
//!
//! The configuration is an optional TOML file. Every key has a default so a
//! missing file, or a file that sets only some keys, is valid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::pagination::{effective_page_size, DEFAULT_PAGE_SIZE};

pub const DEFAULT_API_URL: &str = "https://dummyjson.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Error type for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid API URL: {0}")]
    InvalidApiUrl(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub api_url: String,
    pub page_size: usize,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validated()
    }

    /// Apply CLI/environment overrides to the configuration
    pub fn with_overrides(
        mut self,
        api_url: Option<String>,
        page_size: Option<usize>,
    ) -> Result<Self, ConfigError> {
        if let Some(url) = api_url {
            self.api_url = url;
        }
        if let Some(size) = page_size {
            self.page_size = size;
        }
        self.validated()
    }

    /// API base URL without trailing slash
    pub fn base_url(&self) -> &str {
        self.api_url.trim_end_matches('/')
    }

    fn validated(mut self) -> Result<Self, ConfigError> {
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::InvalidApiUrl(self.api_url));
        }
        self.page_size = effective_page_size(self.page_size);
        Ok(self)
    }
}

/// Load configuration from `path`, falling back to defaults if it is missing
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }

    let text = fs::read_to_string(path)?;
    Config::from_toml(&text)
}
