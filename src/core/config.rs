use crate::core::price::ManualPrices;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct MetalsProviderConfig {
    pub base_url: String,
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProvidersConfig {
    pub metals: Option<MetalsProviderConfig>,
    /// Answer with simulated prices when the live provider fails or is absent.
    #[serde(default = "default_true")]
    pub synthetic_fallback: bool,
}

impl Default for ProvidersConfig {
    fn default() -> Self {
        ProvidersConfig {
            metals: None,
            synthetic_fallback: true,
        }
    }
}

fn default_base_currency() -> String {
    "ZAR".to_string()
}

fn default_secondary_currency() -> String {
    "USD".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default = "default_base_currency")]
    pub base_currency: String,
    #[serde(default = "default_secondary_currency")]
    pub secondary_currency: String,
    pub display_currency: Option<String>,
    #[serde(default)]
    pub providers: ProvidersConfig,
    pub manual_prices: Option<ManualPrices>,
    pub data_path: Option<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: default_base_currency(),
            secondary_currency: default_secondary_currency(),
            display_currency: None,
            providers: ProvidersConfig::default(),
            manual_prices: None,
            data_path: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("org", "metaltrack", "metaltrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("org", "metaltrack", "metaltrack")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Currency used for portfolio values unless one is requested explicitly.
    pub fn display_currency(&self) -> &str {
        self.display_currency
            .as_deref()
            .unwrap_or(&self.base_currency)
    }

    /// Canonical code for a requested currency, or the display currency when
    /// none is requested. Only the base and secondary currencies are accepted.
    pub fn resolve_currency(&self, requested: Option<&str>) -> Result<String> {
        let requested = requested.map_or(self.display_currency(), str::trim);
        match [&self.base_currency, &self.secondary_currency]
            .into_iter()
            .find(|code| code.eq_ignore_ascii_case(requested))
        {
            Some(code) => Ok(code.clone()),
            None => bail!(
                "Unsupported currency {requested}, expected {} or {}",
                self.base_currency,
                self.secondary_currency
            ),
        }
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}
