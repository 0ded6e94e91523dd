//! Application configuration management.
//!
//! This module handles loading and saving the application configuration,
//! which includes the API base address, the last signed-in email (used to
//! prefill the login screen), and the storage backend preference.
//!
//! Configuration is stored at `~/.config/rumbo/config.json`.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Application name used for config directory paths
const APP_NAME: &str = "rumbo";

/// Config file name
const CONFIG_FILE: &str = "config.json";

/// Base address of the booking service, origin plus `/api`. The mobile
/// builds ship with this same development address baked in; override it
/// with `RUMBO_API_URL` or the config file.
pub const DEFAULT_API_BASE_URL: &str = "http://192.168.101.77:8080/api";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Could not find a config directory for this platform")]
    NoConfigDir,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub api_base_url: Option<String>,
    pub last_email: Option<String>,
    pub storage_backend: Option<String>,
}

impl Config {
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;
        if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            Ok(serde_json::from_str(&contents)?)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<(), ConfigError> {
        let path = Self::config_path()?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let contents = serde_json::to_string_pretty(self)?;
        std::fs::write(path, contents)?;
        Ok(())
    }

    fn config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join(APP_NAME).join(CONFIG_FILE))
    }

    /// Resolved base URL: `RUMBO_API_URL`, then the config file, then the
    /// built-in default.
    pub fn api_base_url(&self) -> String {
        resolve_base_url(std::env::var("RUMBO_API_URL").ok(), self.api_base_url.clone())
    }

    /// Configured storage backend preference, if any.
    pub fn storage_backend(&self) -> Option<&str> {
        self.storage_backend.as_deref()
    }
}

fn resolve_base_url(env_value: Option<String>, stored: Option<String>) -> String {
    env_value
        .filter(|v| !v.trim().is_empty())
        .or(stored)
        .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string())
}

// ============================================================================
// Tests
// ============================================================================
