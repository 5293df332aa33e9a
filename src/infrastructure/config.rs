//! Application configuration
//!
//! JSON configuration with sane defaults, loaded and saved through
//! `tokio::fs`. A missing file is not an error: defaults are written on
//! first run so the file documents every available knob.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;
use tracing::info;

/// Complete configuration for the catalog core.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Backend connection settings
    pub http: HttpConfig,
    /// Identifier validation tuning
    pub validation: ValidationConfig,
    /// List view defaults
    pub listing: ListingConfig,
    /// Logging output control
    pub logging: LoggingConfig,
}

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpConfig {
    /// Base URL of the catalog backend
    pub base_url: String,
    /// Request timeout in seconds (also the only write timeout)
    pub timeout_seconds: u64,
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:3002".to_string(),
            timeout_seconds: 30,
            user_agent: concat!("bp-catalog/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Identifier validation tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Quiet window before a keystroke burst triggers a uniqueness check
    pub debounce_ms: u64,
    /// Minimum value length that reaches the backend
    pub min_query_len: usize,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            debounce_ms: 500,
            min_query_len: 3,
        }
    }
}

/// List view defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingConfig {
    pub default_page_size: usize,
    /// Page sizes offered by the UI select box
    pub page_size_options: Vec<usize>,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            default_page_size: 5,
            page_size_options: vec![5, 10, 20],
        }
    }
}

/// Logging output control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default level when RUST_LOG is not set
    pub level: String,
    pub console: bool,
    /// Directory for the log file; `None` disables file output
    pub file_dir: Option<String>,
    pub file_name: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            console: true,
            file_dir: None,
            file_name: "bp-catalog.log".to_string(),
        }
    }
}

impl From<&ValidationConfig> for crate::application::ValidatorConfig {
    fn from(config: &ValidationConfig) -> Self {
        Self {
            debounce: std::time::Duration::from_millis(config.debounce_ms),
            min_query_len: config.min_query_len,
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON file.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }

    /// Save configuration as pretty-printed JSON.
    pub async fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create config dir: {}", parent.display()))?;
        }
        let raw = serde_json::to_string_pretty(self).context("Failed to serialize config")?;
        fs::write(path, raw)
            .await
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Load the file if present, otherwise write defaults and use them.
    pub async fn load_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if fs::try_exists(path).await.unwrap_or(false) {
            Self::load(path).await
        } else {
            info!(path = %path.display(), "config file missing, writing defaults");
            let config = Self::default();
            config.save(path).await?;
            Ok(config)
        }
    }
}
