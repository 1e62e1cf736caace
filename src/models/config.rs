//! Application configuration structures.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};
use crate::models::Language;

/// Environment variable overriding `store.api_key`.
pub const API_KEY_ENV: &str = "CATALOG_API_KEY";

/// Environment variable overriding `store.base_url`.
pub const BASE_URL_ENV: &str = "CATALOG_BASE_URL";

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Remote record store connection settings
    #[serde(default)]
    pub store: StoreConfig,

    /// Snapshot cache settings
    #[serde(default)]
    pub cache: CacheConfig,

    /// Local client storage settings
    #[serde(default)]
    pub storage: StorageConfig,

    /// Display language
    #[serde(default)]
    pub locale: LocaleSettings,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.apply_env();
        Ok(config)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            let mut config = Self::default();
            config.apply_env();
            config
        })
    }

    /// Apply environment overrides for secrets and endpoints.
    pub fn apply_env(&mut self) {
        if let Ok(key) = env::var(API_KEY_ENV) {
            self.store.api_key = key;
        }
        if let Ok(url) = env::var(BASE_URL_ENV) {
            self.store.base_url = url;
        }
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        if self.store.base_url.trim().is_empty() {
            return Err(AppError::validation("store.base_url is empty"));
        }
        url::Url::parse(&self.store.base_url)?;
        if self.store.user_agent.trim().is_empty() {
            return Err(AppError::validation("store.user_agent is empty"));
        }
        if self.store.timeout_secs == 0 {
            return Err(AppError::validation("store.timeout_secs must be > 0"));
        }
        if self.cache.ttl_secs == 0 {
            return Err(AppError::validation("cache.ttl_secs must be > 0"));
        }
        self.cache.ttl()?;
        if self.storage.dir.as_os_str().is_empty() {
            return Err(AppError::validation("storage.dir is empty"));
        }
        Ok(())
    }
}

/// Remote record store connection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Project URL of the hosted database (REST API lives under `/rest/v1`)
    #[serde(default = "defaults::base_url")]
    pub base_url: String,

    /// Anonymous or service API key
    #[serde(default)]
    pub api_key: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds
    #[serde(default = "defaults::timeout")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            base_url: defaults::base_url(),
            api_key: String::new(),
            user_agent: defaults::user_agent(),
            timeout_secs: defaults::timeout(),
        }
    }
}

/// Snapshot cache settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// How long a fetched snapshot is served before refetching
    #[serde(default = "defaults::ttl")]
    pub ttl_secs: u64,
}

impl CacheConfig {
    /// Snapshot lifetime; errors if `ttl_secs` does not fit a duration.
    pub fn ttl(&self) -> Result<TimeDelta> {
        i64::try_from(self.ttl_secs)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .ok_or_else(|| AppError::config(format!("cache.ttl_secs out of range: {}", self.ttl_secs)))
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: defaults::ttl(),
        }
    }
}

/// Local client storage settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding persisted client state
    #[serde(default = "defaults::storage_dir")]
    pub dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            dir: defaults::storage_dir(),
        }
    }
}

/// Display language settings.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LocaleSettings {
    #[serde(default)]
    pub language: Language,

    /// Optional TOML file overriding the built-in messages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages_file: Option<PathBuf>,
}

mod defaults {
    use std::path::PathBuf;

    pub fn base_url() -> String {
        "http://localhost:54321".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; casino-catalog/0.1)".into()
    }
    pub fn timeout() -> u64 {
        15
    }
    pub fn ttl() -> u64 {
        300
    }
    pub fn storage_dir() -> PathBuf {
        PathBuf::from("storage")
    }
}
