//! `AppConfig` struct and TOML read/write.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api.api_key`.
pub const API_KEY_ENV: &str = "MOVIEMAX_API_KEY";

/// Directory under `~/.config` holding the config file.
const APP_DIR_NAME: &str = "moviemax";

/// Config file name inside the config directory.
const CONFIG_FILE_NAME: &str = "config.toml";

/// Location of the config file: `{dir}/config.toml` when `--dir` is given,
/// `~/.config/moviemax/config.toml` otherwise.
///
/// # Errors
///
/// Returns an error if `HOME` is unset and no `dir` was given.
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    let config_dir = match dir {
        Some(dir) => dir.clone(),
        None => {
            let home = std::env::var("HOME").context("HOME environment variable is not set")?;
            PathBuf::from(home).join(".config").join(APP_DIR_NAME)
        }
    };
    Ok(config_dir.join(CONFIG_FILE_NAME))
}

/// Top-level application configuration.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct AppConfig {
    /// Catalog API settings.
    #[serde(default)]
    pub api: ApiConfig,
}

/// Catalog API configuration.
///
/// Unset fields fall back to the client defaults.
#[derive(Debug, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ApiConfig {
    /// API key sent with every request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
    /// Catalog API base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    /// Image host base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_base_url: Option<String>,
    /// Response language (e.g. "en-US").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

impl ApiConfig {
    /// Resolves the API key, preferring a non-empty `env_value` over the file.
    #[must_use]
    pub fn resolve_api_key(&self, env_value: Option<String>) -> Option<String> {
        env_value
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.api_key.clone())
            .filter(|v| !v.trim().is_empty())
    }
}

impl AppConfig {
    /// Loads config from a TOML file. Returns default if file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Saves config to a TOML file, creating parent directories if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if directory creation or file write fails.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }
        let content = toml::to_string_pretty(self).context("failed to serialize config to TOML")?;
        std::fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
    }
}
