//! Configuration loading from rentcast-mcp.toml and the environment.

use rentcast::{ApiKey, RentcastClient};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Config file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "rentcast-mcp.toml";

pub const ENV_API_KEY: &str = "RENTCAST_API_KEY";
pub const ENV_BASE_URL: &str = "RENTCAST_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "RENTCAST_TIMEOUT_SECS";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Vendor API settings.
    #[serde(default)]
    pub api: ApiConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

/// RentCast API configuration.
#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    /// RentCast API key. Prefer RENTCAST_API_KEY over storing it here.
    pub api_key: Option<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Per-request timeout.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LogConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_base_url() -> String {
    rentcast::DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    rentcast::DEFAULT_TIMEOUT.as_secs()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML string.
    pub fn parse(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load the explicit file, else `rentcast-mcp.toml` if present, else defaults.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match explicit {
            Some(path) if !path.exists() => Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Overlay environment variables, read through `lookup`.
    pub fn apply_env(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(key) = lookup(ENV_API_KEY) {
            self.api.api_key = Some(key);
        }
        if let Some(url) = lookup(ENV_BASE_URL) {
            self.api.base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.api.timeout_secs = secs.trim().parse().map_err(|_| ConfigError::InvalidValue {
                key: ENV_TIMEOUT_SECS,
                value: secs.clone(),
            })?;
        }
        Ok(())
    }

    /// The validated API key. Missing or malformed keys are fatal.
    pub fn api_key(&self) -> rentcast::Result<ApiKey> {
        ApiKey::from_option(self.api.api_key.as_deref())
    }

    /// Build the RentCast client from this configuration.
    pub fn client(&self) -> rentcast::Result<RentcastClient> {
        if self.api.timeout_secs == 0 {
            return Err(rentcast::Error::Config(
                "api.timeout_secs must be greater than zero".to_string(),
            ));
        }

        RentcastClient::builder(self.api_key()?)
            .base_url(&self.api.base_url)
            .timeout(Duration::from_secs(self.api.timeout_secs))
            .build()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(String),

    #[error("config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
