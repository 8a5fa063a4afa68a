//! Configuration management

use crate::core::{Error, Region, Result, Selection};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub defaults: DefaultsConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub ingest: IngestConfig,
}

impl Config {
    /// Get the configuration file path
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

        Ok(config_dir.join("gpu-power-cost").join("config.toml"))
    }

    /// Load configuration from the default location
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing defaults there if it does not exist
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(path)?;
        toml::from_str(&content).map_err(|e| Error::Config(format!("Failed to parse config: {}", e)))
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Serialization(e.to_string()))?;
        fs::write(path, content)?;
        Ok(())
    }
}

/// General application settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Language: "auto", "en", "fr"
    #[serde(default = "default_language")]
    pub language: String,
}

fn default_language() -> String { "auto".to_string() }

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            language: default_language(),
        }
    }
}

/// Where the catalog and the two price feeds are read from
///
/// Each entry is either a local path or an `http(s)://` URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// SQLite database file or catalog API URL
    #[serde(default = "default_catalog")]
    pub catalog: String,
    /// `state,price,period` CSV, cents per kWh
    #[serde(default = "default_domestic_prices")]
    pub domestic_prices: String,
    /// `country,price,period` CSV, dollars per kWh
    #[serde(default = "default_international_prices")]
    pub international_prices: String,
}

fn default_catalog() -> String { "http://localhost:3000/api/gpus".to_string() }
fn default_domestic_prices() -> String { "data/electricity_prices.csv".to_string() }
fn default_international_prices() -> String { "data/international_electricity_prices.csv".to_string() }

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            catalog: default_catalog(),
            domestic_prices: default_domestic_prices(),
            international_prices: default_international_prices(),
        }
    }
}

/// Initial selection shown when a session starts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_company")]
    pub company: String,
    #[serde(default = "default_state")]
    pub state: String,
    #[serde(default = "default_daily_hours")]
    pub daily_hours: u32,
    /// Not restricted to the selectable presets
    #[serde(default = "default_workload")]
    pub workload: f64,
}

fn default_company() -> String { "Nvidia".to_string() }
fn default_state() -> String { "CA".to_string() }
fn default_daily_hours() -> u32 { 10 }
fn default_workload() -> f64 { 0.7 }

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            company: default_company(),
            state: default_state(),
            daily_hours: default_daily_hours(),
            workload: default_workload(),
        }
    }
}

impl DefaultsConfig {
    /// Build the initial selection
    pub fn selection(&self) -> Selection {
        Selection {
            gpu_company: self.company.clone(),
            gpu_model: String::new(),
            region: Region::state(&self.state),
            daily_hours: self.daily_hours,
            workload_factor: self.workload,
        }
    }
}

/// Catalog API settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_address")]
    pub address: String,
    /// SQLite database served by the API
    #[serde(default = "default_database")]
    pub database: String,
}

fn default_address() -> String { "127.0.0.1:3000".to_string() }
fn default_database() -> String { "gpu_db.db".to_string() }

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            address: default_address(),
            database: default_database(),
        }
    }
}

/// EIA price ingestion settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the EIA API key
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    /// How far back to query, in months
    #[serde(default = "default_months_back")]
    pub months_back: u32,
    /// EIA sector id (RES = residential)
    #[serde(default = "default_sector")]
    pub sector: String,
    #[serde(default = "default_page_length")]
    pub page_length: u32,
    /// CSV files to write
    #[serde(default = "default_outputs")]
    pub outputs: Vec<String>,
}

fn default_base_url() -> String { "https://api.eia.gov/v2".to_string() }
fn default_api_key_env() -> String { "EIA_API_KEY".to_string() }
fn default_months_back() -> u32 { 18 }
fn default_sector() -> String { "RES".to_string() }
fn default_page_length() -> u32 { 1000 }
fn default_outputs() -> Vec<String> {
    vec![
        "data/electricity_prices.csv".to_string(),
        "public/electricity_prices.csv".to_string(),
    ]
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            months_back: default_months_back(),
            sector: default_sector(),
            page_length: default_page_length(),
            outputs: default_outputs(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RegionKind;

    #[test]
    fn test_load_creates_default_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults]\nstate = \"TX\"\ndaily_hours = 4\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.defaults.state, "TX");
        assert_eq!(config.defaults.daily_hours, 4);
        assert_eq!(config.defaults.company, "Nvidia");
        assert_eq!(config.ingest.months_back, 18);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[defaults\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_default_selection() {
        let selection = DefaultsConfig::default().selection();
        assert_eq!(selection, Selection::new());
        assert_eq!(selection.region.kind, RegionKind::State);
        assert_eq!(selection.workload_factor, 0.7);
    }
}
