use crate::domain::display_offset;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load config file: {0}")]
    FileError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Environment variable not found: {0}")]
    EnvVarMissing(String),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;

/// Position replay configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplayConfig {
    /// Wallet address to replay (0x-prefixed)
    #[serde(default)]
    pub address: String,
    /// Event slug (e.g., "btc-updown-15m-1766920500")
    #[serde(default)]
    pub slug: String,
    /// Reference price symbol on Binance
    #[serde(default = "default_price_symbol")]
    pub price_symbol: String,
    /// Directory for snapshots and merged tables
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
    /// Whole-hour offset for the display-time column
    #[serde(default = "default_display_utc_offset_hours")]
    pub display_utc_offset_hours: i32,
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_gamma_api_url")]
    pub gamma_api_url: String,
    #[serde(default = "default_data_api_url")]
    pub data_api_url: String,
    #[serde(default = "default_binance_api_url")]
    pub binance_api_url: String,
}

fn default_price_symbol() -> String {
    "BTCUSDT".to_string()
}

fn default_output_dir() -> String {
    "./output".to_string()
}

fn default_display_utc_offset_hours() -> i32 {
    8
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_gamma_api_url() -> String {
    "https://gamma-api.polymarket.com".to_string()
}

fn default_data_api_url() -> String {
    "https://data-api.polymarket.com".to_string()
}

fn default_binance_api_url() -> String {
    "https://api.binance.com".to_string()
}

impl ReplayConfig {
    /// Load configuration from YAML file and .env
    pub fn load(config_path: impl AsRef<Path>) -> Result<Self> {
        let yaml_content = std::fs::read_to_string(config_path)?;
        let mut config = Self::from_yaml(&yaml_content)?;

        dotenv::dotenv().ok(); // Don't fail if .env doesn't exist
        config.apply_env_overrides();

        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a YAML string (no env overrides, no validation)
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(address) = std::env::var("WALLET_ADDRESS") {
            info!("Overriding wallet address from environment variable");
            self.address = address;
        }
        if let Ok(slug) = std::env::var("EVENT_SLUG") {
            info!("Overriding event slug from environment variable");
            self.slug = slug;
        }
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.address.is_empty() {
            return Err(ConfigError::EnvVarMissing("WALLET_ADDRESS".to_string()));
        }

        // 0x followed by 40 hex characters
        let hex = self.address.strip_prefix("0x").unwrap_or("");
        if hex.len() != 40 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ConfigError::ValidationError(
                "address must be a valid Ethereum address (0x followed by 40 hex characters)"
                    .to_string(),
            ));
        }

        if self.slug.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "slug cannot be empty".to_string(),
            ));
        }

        if self.price_symbol.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "price_symbol cannot be empty".to_string(),
            ));
        }

        if !(-12..=14).contains(&self.display_utc_offset_hours) {
            return Err(ConfigError::ValidationError(
                "display_utc_offset_hours must be between -12 and 14".to_string(),
            ));
        }

        let valid_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_levels.contains(&self.log_level.to_lowercase().as_str()) {
            return Err(ConfigError::ValidationError(format!(
                "log_level must be one of: {}",
                valid_levels.join(", ")
            )));
        }

        for (name, url) in [
            ("gamma_api_url", &self.gamma_api_url),
            ("data_api_url", &self.data_api_url),
            ("binance_api_url", &self.binance_api_url),
        ] {
            if url.is_empty() {
                return Err(ConfigError::ValidationError(format!(
                    "{} cannot be empty",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Fixed offset for the display-time column
    pub fn display_offset(&self) -> Result<FixedOffset> {
        display_offset(self.display_utc_offset_hours).ok_or_else(|| {
            ConfigError::ValidationError(format!(
                "invalid display offset: {}",
                self.display_utc_offset_hours
            ))
        })
    }

    pub fn output_path(&self) -> PathBuf {
        PathBuf::from(&self.output_dir)
    }

    /// Log configuration summary
    pub fn log(&self) {
        info!("Configuration loaded:");
        info!("  Address: {}", self.address);
        info!("  Event slug: {}", self.slug);
        info!("  Price symbol: {}", self.price_symbol);
        info!("  Output dir: {}", self.output_dir);
        info!("  Display offset: UTC{:+}", self.display_utc_offset_hours);
        info!("  Log level: {}", self.log_level);
    }
}
