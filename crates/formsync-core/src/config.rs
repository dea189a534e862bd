use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::retry::RetryPolicy;

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per request (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff (e.g. 0.25 = 250ms).
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay_secs: 0.25,
            max_delay_secs: 30,
        }
    }
}

impl RetryConfig {
    /// Non-finite or out-of-range `base_delay_secs` falls back to the default
    /// base delay; the result never exceeds `max_delay_secs`.
    pub fn to_policy(&self) -> RetryPolicy {
        let max_delay = Duration::from_secs(self.max_delay_secs);
        let base_delay = Duration::try_from_secs_f64(self.base_delay_secs.max(0.0))
            .unwrap_or_else(|_| {
                tracing::warn!(
                    base_delay_secs = self.base_delay_secs,
                    "unusable retry base delay; using default"
                );
                RetryPolicy::default().base_delay
            });
        RetryPolicy {
            max_attempts: self.max_attempts.max(1),
            base_delay: base_delay.min(max_delay),
            max_delay,
        }
    }
}

fn default_connect_timeout() -> u64 {
    30
}

fn default_timeout() -> u64 {
    300
}

/// Global configuration loaded from `~/.config/formsync/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormsyncConfig {
    /// Base URL of the OpenRosa server; `/formList` is appended to it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub server_url: Option<String>,
    /// Username for basic/digest auth.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Where downloaded forms are written (None = XDG data dir).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forms_dir: Option<PathBuf>,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retry: Option<RetryConfig>,
}

impl Default for FormsyncConfig {
    fn default() -> Self {
        Self {
            server_url: None,
            username: None,
            password: None,
            forms_dir: None,
            connect_timeout_secs: default_connect_timeout(),
            timeout_secs: default_timeout(),
            retry: None,
        }
    }
}

impl FormsyncConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
            .as_ref()
            .map(RetryConfig::to_policy)
            .unwrap_or_default()
    }

    /// Configured forms directory, or `~/.local/share/formsync/forms`.
    pub fn resolved_forms_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.forms_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("formsync")?;
        Ok(xdg_dirs.place_data_file("forms")?)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("formsync")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from `path`, writing a default file there if none exists.
pub fn load_or_init_at(path: &Path) -> Result<FormsyncConfig> {
    if !path.exists() {
        let default_cfg = FormsyncConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: FormsyncConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FormsyncConfig> {
    load_or_init_at(&config_path()?)
}
