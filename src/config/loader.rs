//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section has
//! defaults, so an empty file (or no file at all) yields a working config.
//! A few values can be overridden from the environment (see the `get_*`
//! accessors).

use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

use crate::adapters::dexscreener::{DEFAULT_TIMEOUT, DEXSCREENER_BASE_URL};
use crate::domain::{ChainAllowList, FreshnessMode, DEFAULT_ALLOWED_CHAINS, DEFAULT_CACHE_DURATION};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3001;
pub const DEFAULT_UPSTREAM_URL: &str = DEXSCREENER_BASE_URL;
pub const DEFAULT_TIMEOUT_SECS: u64 = DEFAULT_TIMEOUT.as_secs();
pub const DEFAULT_CACHE_DURATION_MS: u64 = DEFAULT_CACHE_DURATION.as_millis() as u64;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerSection,
    pub upstream: UpstreamSection,
    pub cache: CacheSection,
    pub chains: ChainsSection,
    pub logging: LoggingSection,
}

/// HTTP listener configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address
    pub host: String,
    /// TCP port
    pub port: u16,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl ServerSection {
    /// Get bind host with environment variable override
    /// Checks HOST env var first, falls back to config value
    pub fn get_host(&self) -> String {
        std::env::var("HOST")
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| self.host.clone())
    }

    /// Get port with environment variable override
    /// Checks PORT env var first (ignored if not a valid port), falls back to config value
    pub fn get_port(&self) -> u16 {
        std::env::var("PORT")
            .ok()
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(self.port)
    }
}

/// Upstream market data provider section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UpstreamSection {
    /// Provider base URL (no trailing path)
    pub base_url: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

impl Default for UpstreamSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_UPSTREAM_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl UpstreamSection {
    /// Get base URL with environment variable override
    /// Checks DEXSCREENER_BASE_URL env var first, falls back to config value
    pub fn get_base_url(&self) -> String {
        std::env::var("DEXSCREENER_BASE_URL")
            .ok()
            .filter(|u| !u.trim().is_empty())
            .unwrap_or_else(|| self.base_url.clone())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Snapshot cache section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CacheSection {
    /// Freshness window in milliseconds
    pub duration_ms: u64,
    /// "global" (one shared timestamp) or "per_key"
    pub freshness: FreshnessMode,
}

impl Default for CacheSection {
    fn default() -> Self {
        Self {
            duration_ms: DEFAULT_CACHE_DURATION_MS,
            freshness: FreshnessMode::Global,
        }
    }
}

impl CacheSection {
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Chain allow-list section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChainsSection {
    pub allowed: Vec<String>,
}

impl Default for ChainsSection {
    fn default() -> Self {
        Self {
            allowed: DEFAULT_ALLOWED_CHAINS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl ChainsSection {
    pub fn allow_list(&self) -> ChainAllowList {
        ChainAllowList::new(&self.allowed)
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    parse_config(&content)
}

/// Load configuration from an optional path, falling back to defaults
pub fn load_config_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_config(p),
        None => {
            let config = Config::default();
            config.validate()?;
            Ok(config)
        }
    }
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(content: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Apply environment overrides (HOST, PORT, DEXSCREENER_BASE_URL) to the loaded values
    pub fn with_env_overrides(mut self) -> Self {
        self.server.host = self.server.get_host();
        self.server.port = self.server.get_port();
        self.upstream.base_url = self.upstream.get_base_url();
        self
    }

    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.host.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "server.host cannot be empty".to_string(),
            ));
        }

        let base_url = self.upstream.base_url.trim();
        if base_url.is_empty() {
            return Err(ConfigError::ValidationError(
                "upstream.base_url cannot be empty".to_string(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ConfigError::ValidationError(format!(
                "upstream.base_url must be an http(s) URL, got {}",
                base_url
            )));
        }

        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "upstream.timeout_secs must be > 0".to_string(),
            ));
        }

        if self.cache.duration_ms == 0 {
            return Err(ConfigError::ValidationError(
                "cache.duration_ms must be > 0".to_string(),
            ));
        }

        if self.chains.allow_list().is_empty() {
            return Err(ConfigError::ValidationError(
                "chains.allowed must contain at least one chain".to_string(),
            ));
        }

        Ok(())
    }
}
