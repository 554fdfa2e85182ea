//! Configuration file handling.
//!
//! Reads from `~/.config/shoprs/shoprs.toml`

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the three demo CSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Directory for the persisted key-value store.
    #[serde(default = "default_store_dir")]
    pub store_dir: PathBuf,
    /// Price-simulation period in seconds.
    #[serde(default = "default_tick_seconds")]
    pub tick_seconds: u64,
    /// Products shown per catalog page.
    #[serde(default = "default_products_per_page")]
    pub products_per_page: usize,
    /// Products strictly below this price count as flash-sale items.
    #[serde(default = "default_flash_sale_threshold")]
    pub flash_sale_threshold: f64,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_store_dir() -> PathBuf {
    PathBuf::from("store")
}

fn default_tick_seconds() -> u64 {
    shoprs_core::simulation::DEFAULT_TICK_SECONDS
}

fn default_products_per_page() -> usize {
    shoprs_core::catalog::DEFAULT_PAGE_SIZE
}

fn default_flash_sale_threshold() -> f64 {
    3000.0
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            store_dir: default_store_dir(),
            tick_seconds: default_tick_seconds(),
            products_per_page: default_products_per_page(),
            flash_sale_threshold: default_flash_sale_threshold(),
        }
    }
}

impl Config {
    /// Load configuration from the config file.
    ///
    /// If `custom_path` is provided, load from that path.
    /// Otherwise, load from the default XDG config location.
    /// Creates a default config file if it doesn't exist (only for default path).
    pub fn load(custom_path: Option<PathBuf>) -> Result<Self> {
        let is_custom = custom_path.is_some();
        let config_path = match custom_path {
            Some(path) => path,
            None => Self::config_path()?,
        };

        if !config_path.exists() {
            if !is_custom {
                let config = Config::default();
                config.save()?;
                tracing::info!("Created default config: {:?}", config);
                return Ok(config);
            } else {
                anyhow::bail!("Config file not found: {}", config_path.display());
            }
        }

        let contents = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        tracing::info!("Loaded config from {}: {:?}", config_path.display(), config);
        Ok(config)
    }

    /// Save configuration to the config file.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(&config_path, contents)
            .with_context(|| format!("Failed to write config file: {}", config_path.display()))
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join("shoprs").join("shoprs.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: Config = toml::from_str("data_dir = \"/tmp/demo\"").unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/demo"));
        assert_eq!(config.tick_seconds, 5);
        assert_eq!(config.products_per_page, 8);
        assert_eq!(config.flash_sale_threshold, 3000.0);
    }

    #[test]
    fn custom_path_must_exist() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(Config::load(Some(missing)).is_err());
    }

    #[test]
    fn custom_path_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shoprs.toml");
        let contents = toml::to_string_pretty(&Config {
            tick_seconds: 2,
            ..Default::default()
        })
        .unwrap();
        std::fs::write(&path, contents).unwrap();

        let config = Config::load(Some(path)).unwrap();
        assert_eq!(config.tick_seconds, 2);
    }
}
