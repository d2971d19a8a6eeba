//! Application configuration management.
//!
//! This module resolves the backend base URL and derives the portal
//! endpoints from it, and persists the small amount of user state the client
//! remembers between runs (the last email used to log in).
//!
//! Configuration is stored at `~/.config/quantum-scholar/config.json`.
//! The `QS_API_BASE_URL` environment variable overrides the stored base URL.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Application name used for config/cache directory paths
const APP_NAME: &str = "quantum-scholar";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Environment variable selecting the backend base URL
pub const API_BASE_URL_ENV: &str = "QS_API_BASE_URL";

/// Backend used when nothing else is configured
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct Config {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_email: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::default_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file {}", path.display()))?;
            serde_json::from_str(&contents)
                .with_context(|| format!("Failed to parse config file {}", path.display()))
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    /// `~/.config/quantum-scholar/config.json` on Linux
    pub fn default_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find config directory"))?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Directory for log files and other disposable state
    pub fn cache_dir(&self) -> Result<PathBuf> {
        let cache_dir = dirs::cache_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not find cache directory"))?;
        Ok(cache_dir.join(APP_NAME))
    }

    /// Effective base URL: environment, then config file, then the default
    pub fn api_base_url(&self) -> String {
        let from_env = std::env::var(API_BASE_URL_ENV).ok();
        resolve_base_url(from_env.as_deref(), self.api_base_url.as_deref())
    }

    pub fn endpoints(&self) -> Endpoints {
        Endpoints::from_base(&self.api_base_url())
    }
}

fn resolve_base_url(from_env: Option<&str>, from_config: Option<&str>) -> String {
    let chosen = [from_env, from_config]
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
        .unwrap_or(DEFAULT_API_BASE_URL);
    chosen.trim_end_matches('/').to_string()
}

/// Fully qualified portal endpoints for one backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub base_url: String,
    pub login: String,
    pub init_test: String,
    pub start_test: String,
}

impl Endpoints {
    pub fn from_base(base_url: &str) -> Self {
        let base = base_url.trim_end_matches('/');
        Self {
            base_url: base.to_string(),
            login: format!("{}/auth/test-portal/login", base),
            init_test: format!("{}/test-portal/init", base),
            start_test: format!("{}/test-portal/start", base),
        }
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::from_base(DEFAULT_API_BASE_URL)
    }
}
