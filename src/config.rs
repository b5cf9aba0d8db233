use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use crate::{dlog_debug, Error, Result};

/// Project deadline used when the config file does not set one.
pub const DEFAULT_DEADLINE: &str = "2025-02-26T23:59:59Z";

fn default_operator() -> String {
    "Current User".to_string()
}

fn default_sync_interval_secs() -> u64 {
    45
}

fn default_sync_settle_ms() -> u64 {
    1200
}

fn default_reminder_interval_secs() -> u64 {
    30
}

fn default_api_model() -> String {
    "gemini-3-pro-preview".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Name recorded as the author of user-driven history entries.
    #[serde(default = "default_operator")]
    pub operator: String,
    /// Decommission deadline, RFC 3339. Drives the countdown banner.
    pub deadline: Option<String>,
    #[serde(default = "default_sync_interval_secs")]
    pub sync_interval_secs: u64,
    /// Delay between a sync tick and the mutation landing.
    #[serde(default = "default_sync_settle_ms")]
    pub sync_settle_ms: u64,
    #[serde(default = "default_reminder_interval_secs")]
    pub reminder_interval_secs: u64,
    /// Assistant API base URL. None uses the Google endpoint.
    pub api_base: Option<String>,
    #[serde(default = "default_api_model")]
    pub api_model: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            operator: default_operator(),
            deadline: None,
            sync_interval_secs: default_sync_interval_secs(),
            sync_settle_ms: default_sync_settle_ms(),
            reminder_interval_secs: default_reminder_interval_secs(),
            api_base: None,
            api_model: default_api_model(),
        }
    }
}

impl Config {
    pub fn app_dir() -> Result<PathBuf> {
        Ok(dirs::home_dir().ok_or(Error::NoHomeDir)?.join(".sundown"))
    }

    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::app_dir()?.join("sundown.toml"))
    }

    /// Parsed deadline, falling back to the project default when unset or
    /// unparseable.
    pub fn deadline_utc(&self) -> DateTime<Utc> {
        let raw = self.deadline.as_deref().unwrap_or(DEFAULT_DEADLINE);
        DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.with_timezone(&Utc))
            .unwrap_or_else(|_| {
                // Unparseable user value falls back to the default constant,
                // which is known-good.
                DateTime::parse_from_rfc3339(DEFAULT_DEADLINE)
                    .map(|dt| dt.with_timezone(&Utc))
                    .unwrap_or_else(|_| Utc::now())
            })
    }

    /// API key for the assistant, environment only (never stored in the
    /// config file).
    pub fn api_key() -> Option<String> {
        std::env::var("GEMINI_API_KEY")
            .ok()
            .filter(|k| !k.is_empty())
    }

    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        dlog_debug!("Config::load path={}", path.display());
        if !path.exists() {
            dlog_debug!("Config file not found, using defaults");
            return Ok(Self::default());
        }
        let config: Self = toml::from_str(&fs::read_to_string(&path)?)?;
        dlog_debug!(
            "Config loaded: operator={}, sync={}s settle={}ms reminder={}s",
            config.operator,
            config.sync_interval_secs,
            config.sync_settle_ms,
            config.reminder_interval_secs
        );
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        let app_dir = Self::app_dir()?;
        dlog_debug!("Config::save app_dir={}", app_dir.display());
        if !app_dir.exists() {
            fs::create_dir_all(&app_dir)?;
        }
        let path = Self::config_path()?;
        fs::write(&path, toml::to_string_pretty(self)?)?;
        dlog_debug!("Config saved to {}", path.display());
        Ok(())
    }
}
