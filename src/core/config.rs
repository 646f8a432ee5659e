use crate::core::currency::DEFAULT_CURRENCIES;
use anyhow::{Context, Result, bail};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Duration;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ErApiProviderConfig {
    #[serde(default = "default_er_api_url")]
    pub base_url: String,
    /// Currency every rate is quoted against.
    #[serde(default = "default_reference")]
    pub reference: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ErApiProviderConfig {
    fn default() -> Self {
        ErApiProviderConfig {
            base_url: default_er_api_url(),
            reference: default_reference(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ErApiProviderConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct ProvidersConfig {
    #[serde(default)]
    pub er_api: ErApiProviderConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Currency held when a session starts.
    #[serde(default = "default_reference")]
    pub base_currency: String,
    /// Amount held when a session starts.
    #[serde(default = "default_amount")]
    pub amount: f64,
    /// Currencies to list, in display order.
    #[serde(default = "default_currencies")]
    pub currencies: Vec<String>,
    #[serde(default = "default_refresh_interval_secs")]
    pub refresh_interval_secs: u64,
    #[serde(default)]
    pub providers: ProvidersConfig,
}

fn default_er_api_url() -> String {
    "https://open.er-api.com".to_string()
}

fn default_reference() -> String {
    "TWD".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_amount() -> f64 {
    1000.0
}

fn default_currencies() -> Vec<String> {
    DEFAULT_CURRENCIES.iter().map(|c| c.to_string()).collect()
}

fn default_refresh_interval_secs() -> u64 {
    300
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            base_currency: default_reference(),
            amount: default_amount(),
            currencies: default_currencies(),
            refresh_interval_secs: default_refresh_interval_secs(),
            providers: ProvidersConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config from the default location, falling back to built-in
    /// defaults when no config file exists there.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config at {}, using built-in defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("io", "fxboard", "fxboard")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config = Self::from_yaml(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }

    /// Parses, normalises and validates a YAML config document.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let mut config: Self = serde_yaml::from_str(yaml)?;
        config.normalize();
        config.validate()?;
        Ok(config)
    }

    fn normalize(&mut self) {
        self.base_currency = self.base_currency.trim().to_uppercase();
        self.providers.er_api.reference = self.providers.er_api.reference.trim().to_uppercase();
        for code in &mut self.currencies {
            *code = code.trim().to_uppercase();
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.currencies.is_empty() {
            bail!("At least one currency must be configured");
        }
        let mut seen = HashSet::new();
        for code in &self.currencies {
            if code.is_empty() {
                bail!("Currency codes must not be empty");
            }
            if !seen.insert(code.as_str()) {
                bail!("Currency {code} is listed more than once");
            }
        }
        if self.base_currency.is_empty() {
            bail!("Base currency must not be empty");
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            bail!("Amount must be a non-negative number, got {}", self.amount);
        }
        if self.refresh_interval_secs == 0 {
            bail!("Refresh interval must be at least one second");
        }
        if self.providers.er_api.timeout_secs == 0 {
            bail!("Provider timeout must be at least one second");
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }
}
