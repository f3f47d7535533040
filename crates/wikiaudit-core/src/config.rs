//! Application configuration management.
//!
//! Configuration is read from `~/.config/wikiaudit/config.json` when that
//! file exists, then selected fields are overridden from the environment
//! (`WIKIAUDIT_GITHUB_URL`, `WIKIAUDIT_API_URL`, `WIKIAUDIT_REPORT`).

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config directory paths
const APP_NAME: &str = "wikiaudit";

/// Config file name
const CONFIG_FILE: &str = "config.json";

pub const DEFAULT_GITHUB_URL: &str = "https://github.com";
pub const DEFAULT_API_URL: &str = "https://api.github.com";
pub const DEFAULT_REPORT_FILE: &str = "publicwiki.txt";

/// Fixed pause after a 429 from a wiki page. Never grows.
pub const DEFAULT_RATE_LIMIT_PAUSE_SECS: u64 = 15;

/// HTTP request timeout in seconds. Zero means no timeout.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

const ENV_GITHUB_URL: &str = "WIKIAUDIT_GITHUB_URL";
const ENV_API_URL: &str = "WIKIAUDIT_API_URL";
const ENV_REPORT: &str = "WIKIAUDIT_REPORT";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Base URL for the HTML site (login form, wiki pages)
    pub github_url: String,
    /// Base URL for the REST API (repository listing, rate limit)
    pub api_url: String,
    pub report_path: PathBuf,
    pub rate_limit_pause_secs: u64,
    pub request_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            github_url: DEFAULT_GITHUB_URL.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            report_path: PathBuf::from(DEFAULT_REPORT_FILE),
            rate_limit_pause_secs: DEFAULT_RATE_LIMIT_PAUSE_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}

impl Config {
    /// Load the user config file (if any) and apply environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::config_path() {
            Ok(path) => Self::load_from(&path)?,
            Err(_) => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply overrides looked up by environment variable name.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_GITHUB_URL).filter(|v| !v.is_empty()) {
            self.github_url = url;
        }
        if let Some(url) = lookup(ENV_API_URL).filter(|v| !v.is_empty()) {
            self.api_url = url;
        }
        if let Some(path) = lookup(ENV_REPORT).filter(|v| !v.is_empty()) {
            self.report_path = PathBuf::from(path);
        }
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    pub fn rate_limit_pause(&self) -> Duration {
        Duration::from_secs(self.rate_limit_pause_secs)
    }

    /// Per-request timeout; `request_timeout_secs: 0` disables it.
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}
