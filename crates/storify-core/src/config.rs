use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::CachePolicy;
use crate::logging::{LogDestination, LogLevel};

/// Response memoization (optional section in config.toml).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Keep fetched documents in memory, keyed by (user, slug, kind).
    #[serde(default)]
    pub enabled: bool,
    /// Entry lifetime in seconds; unset means entries never expire.
    #[serde(default)]
    pub ttl_secs: Option<u64>,
}

impl CacheConfig {
    pub fn policy(&self) -> CachePolicy {
        if self.enabled {
            CachePolicy::Memory {
                ttl: self.ttl_secs.map(Duration::from_secs),
            }
        } else {
            CachePolicy::PassThrough
        }
    }
}

/// Global configuration loaded from `~/.config/storify/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorifyConfig {
    /// Skip TLS certificate verification. Off unless set explicitly.
    #[serde(default)]
    pub insecure_tls: bool,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// Minimum severity written to the log sink.
    #[serde(default)]
    pub log_level: LogLevel,
    /// Log file; when unset, logs go to stderr.
    #[serde(default)]
    pub log_file: Option<PathBuf>,
    /// Optional response cache; if missing, fetches pass straight through.
    #[serde(default)]
    pub cache: Option<CacheConfig>,
}

impl Default for StorifyConfig {
    fn default() -> Self {
        Self {
            insecure_tls: false,
            connect_timeout_secs: 15,
            timeout_secs: 30,
            log_level: LogLevel::default(),
            log_file: None,
            cache: None,
        }
    }
}

impl StorifyConfig {
    pub fn log_destination(&self) -> LogDestination {
        match &self.log_file {
            Some(path) => LogDestination::File(path.clone()),
            None => LogDestination::Stderr,
        }
    }

    pub fn cache_policy(&self) -> CachePolicy {
        self.cache
            .as_ref()
            .map(CacheConfig::policy)
            .unwrap_or_default()
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("storify")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<StorifyConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = StorifyConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: StorifyConfig = toml::from_str(&data)?;
    Ok(cfg)
}
