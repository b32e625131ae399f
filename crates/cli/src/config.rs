//! Application configuration
//!
//! Loaded from `<config dir>/badgedesk/config.toml` unless a path is given.
//! A missing file means defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "badgedesk";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub log: LogConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// `host:port` of the backend RPC endpoint
    pub address: String,
    pub request_timeout_ms: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            address: "127.0.0.1:7741".to_string(),
            request_timeout_ms: 30_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// How long a notification stays visible
    pub notice_auto_hide_ms: u64,
    /// Delay before the create form's first preview
    pub initial_preview_delay_ms: u64,
    /// Delay before an edit/recover modal's first preview
    pub modal_preview_delay_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            notice_auto_hide_ms: 5_000,
            initial_preview_delay_ms: 500,
            modal_preview_delay_ms: 100,
        }
    }
}

impl UiConfig {
    pub fn notice_auto_hide(&self) -> Duration {
        Duration::from_millis(self.notice_auto_hide_ms)
    }

    pub fn initial_preview_delay(&self) -> Duration {
        Duration::from_millis(self.initial_preview_delay_ms)
    }

    pub fn modal_preview_delay(&self) -> Duration {
        Duration::from_millis(self.modal_preview_delay_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive; `RUST_LOG` takes precedence
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<()> {
        if self.backend.address.trim().is_empty() {
            anyhow::bail!("backend.address must not be empty");
        }
        check_range("backend.request_timeout_ms", self.backend.request_timeout_ms, 100, 600_000)?;
        check_range("ui.notice_auto_hide_ms", self.ui.notice_auto_hide_ms, 500, 60_000)?;
        check_range("ui.initial_preview_delay_ms", self.ui.initial_preview_delay_ms, 0, 10_000)?;
        check_range("ui.modal_preview_delay_ms", self.ui.modal_preview_delay_ms, 0, 10_000)?;

        match self.log.level.to_ascii_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" | "off" => Ok(()),
            other => anyhow::bail!(
                "log.level must be one of trace, debug, info, warn, error, off (got '{}')",
                other
            ),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.backend.request_timeout_ms)
    }
}

fn check_range(key: &str, value: u64, min: u64, max: u64) -> Result<()> {
    if value < min || value > max {
        anyhow::bail!("{} must be between {} and {} (got {})", key, min, max, value);
    }
    Ok(())
}

/// Default config file location
pub fn config_file_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}

/// Load and validate the config at `path` (or the default location)
pub fn load(path: Option<&Path>) -> Result<AppConfig> {
    let path = match path {
        Some(path) => path.to_path_buf(),
        None => match config_file_path() {
            Some(path) => path,
            None => return Ok(AppConfig::default()),
        },
    };

    if !path.exists() {
        return Ok(AppConfig::default());
    }

    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    let config: AppConfig = toml::from_str(&text)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    config
        .validate()
        .with_context(|| format!("Invalid configuration in {}", path.display()))?;

    Ok(config)
}

/// Render a config as TOML
pub fn to_toml(config: &AppConfig) -> Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize configuration")
}
