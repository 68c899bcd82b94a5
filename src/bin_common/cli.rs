//! CLI utilities for binaries
//!
//! Handles configuration loading, environment variables and the
//! start/stop banners shared by all binary executables.

use anyhow::Context;
use replay::infrastructure::ReplayConfig;
use std::path::PathBuf;
use tracing::info;

/// Type of configuration to load
#[derive(Debug, Clone)]
pub enum ConfigType {
    /// Replay configuration (config.yaml)
    Replay,
    /// Custom path
    Custom(String),
}

impl ConfigType {
    /// Get the default path for this config type
    pub fn default_path(&self) -> &str {
        match self {
            ConfigType::Replay => "config.yaml",
            ConfigType::Custom(path) => path,
        }
    }

    /// Get the environment variable name for this config type
    pub fn env_var_name(&self) -> &str {
        "CONFIG_PATH"
    }
}

/// Load configuration path from environment or use default
///
/// # Examples
/// ```
/// use polymarket_position_replay::bin_common::{load_config_from_env, ConfigType};
///
/// let path = load_config_from_env(ConfigType::Replay);
/// ```
pub fn load_config_from_env(config_type: ConfigType) -> PathBuf {
    match config_type {
        ConfigType::Custom(path) => path.into(),
        other => std::env::var(other.env_var_name())
            .unwrap_or_else(|_| other.default_path().to_string())
            .into(),
    }
}

/// Resolve the config path and load the replay configuration
pub fn load_replay_config() -> anyhow::Result<ReplayConfig> {
    let path = load_config_from_env(ConfigType::Replay);
    ReplayConfig::load(&path).with_context(|| format!("Failed to load config from {:?}", path))
}

pub fn print_banner(name: &str) {
    info!("");
    info!("========================================");
    info!("Starting {}", name);
    info!("========================================");
    info!("");
}

pub fn print_shutdown(name: &str, stats: Option<&str>) {
    info!("");
    info!("========================================");
    info!("{} finished", name);
    if let Some(stats) = stats {
        info!("{}", stats);
    }
    info!("========================================");
}
