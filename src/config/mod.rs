//! Configuration module for the rotation scanner.
//!
//! Configuration is a TOML file holding the report destination, the ticker
//! catalog, the theme table and optional momentum/sentiment tuning. A few
//! environment variables override the file, see [`AppConfig::from_env`].

mod momentum_config;
mod sentiment_config;

pub use momentum_config::MomentumConfig;
pub use sentiment_config::SentimentConfig;

use crate::domain::catalog::TickerCatalog;
use crate::domain::theme::ThemeDefinition;
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_CONFIG_PATH: &str = "rotation.toml";
pub const CONFIG_PATH_VAR: &str = "ROTATION_CONFIG";
pub const VAULT_PATH_VAR: &str = "ROTATION_VAULT_PATH";

fn default_reports_subfolder() -> String {
    "Capital Rotation".to_string()
}

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    // Output location
    pub vault_path: PathBuf,
    #[serde(default = "default_reports_subfolder")]
    pub reports_subfolder: String,

    // Tracked universe
    #[serde(default)]
    pub tickers: TickerCatalog,
    #[serde(default = "ThemeDefinition::defaults")]
    pub themes: Vec<ThemeDefinition>,

    // Tuning
    #[serde(default)]
    pub momentum: MomentumConfig,
    #[serde(default)]
    pub sentiment: SentimentConfig,
}

impl AppConfig {
    /// Loads configuration from `config_path`, falling back to
    /// `ROTATION_CONFIG` and then `rotation.toml`.
    ///
    /// `ROTATION_VAULT_PATH` replaces `vault_path` from the file.
    pub fn from_env(config_path: Option<&Path>) -> Result<Self> {
        Self::resolve(config_path, |key| env::var(key).ok())
    }

    pub(crate) fn resolve<F>(config_path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let path = match config_path {
            Some(path) => path.to_path_buf(),
            None => lookup(CONFIG_PATH_VAR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH)),
        };

        let mut config = Self::load(&path)?;

        if let Some(vault) = lookup(VAULT_PATH_VAR).filter(|v| !v.trim().is_empty()) {
            config.vault_path = PathBuf::from(vault);
        }
        config.vault_path = expand_home(&config.vault_path, lookup("HOME").as_deref());

        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            bail!(
                "Configuration file not found: {}. Copy rotation.example.toml to {} and edit it.",
                path.display(),
                DEFAULT_CONFIG_PATH
            );
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        self.momentum.validate()?;

        for (index, theme) in self.themes.iter().enumerate() {
            if theme.name.trim().is_empty() {
                bail!("themes[{}] has an empty name", index);
            }
            if self.themes[..index].iter().any(|t| t.name == theme.name) {
                bail!("Theme '{}' is defined twice", theme.name);
            }
        }

        Ok(())
    }

    /// Directory receiving the markdown reports.
    pub fn reports_dir(&self) -> PathBuf {
        self.vault_path.join(&self.reports_subfolder)
    }

    /// Directory receiving the history logs.
    pub fn data_dir(&self) -> PathBuf {
        self.reports_dir().join("data")
    }
}

/// Replaces a leading `~` with the home directory when one is known.
fn expand_home(path: &Path, home: Option<&str>) -> PathBuf {
    let Some(home) = home else {
        return path.to_path_buf();
    };

    match path.strip_prefix("~") {
        Ok(rest) => PathBuf::from(home).join(rest),
        Err(_) => path.to_path_buf(),
    }
}
