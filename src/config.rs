//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Backend API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout() -> u64 {
    30
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

/// Session and account configuration
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Directory holding the persisted bearer token
    #[serde(default = "default_state_dir")]
    pub state_dir: String,

    /// Password assigned to customers created from the admin client
    #[serde(default = "default_customer_password")]
    pub default_customer_password: String,
}

fn default_state_dir() -> String {
    dirs::data_local_dir()
        .map(|p| p.join("pizza-admin").to_string_lossy().to_string())
        .unwrap_or_else(|| "./pizza_admin_state".to_string())
}

fn default_customer_password() -> String {
    "defaultPassword123".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            state_dir: default_state_dir(),
            default_customer_password: default_customer_password(),
        }
    }
}

impl SessionConfig {
    pub fn state_path(&self) -> PathBuf {
        PathBuf::from(&self.state_dir)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Self::parse(&content).map_err(|error| ConfigError::Parse {
            path: path.to_path_buf(),
            error,
        })
    }

    fn parse(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load from default locations or environment
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("pizza-admin").join("config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::debug!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::debug!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("PIZZA_ADMIN_BASE_URL") {
            self.api.base_url = url;
        }
        if let Ok(timeout) = std::env::var("PIZZA_ADMIN_TIMEOUT_SECS") {
            if let Ok(t) = timeout.parse() {
                self.api.request_timeout_secs = t;
            }
        }

        if let Ok(dir) = std::env::var("PIZZA_ADMIN_STATE_DIR") {
            self.session.state_dir = dir;
        }

        if let Ok(level) = std::env::var("PIZZA_ADMIN_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("PIZZA_ADMIN_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config file {path:?}: {error}")]
    Parse { path: PathBuf, error: String },
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Pizza Admin Configuration
#
# Environment variables override these settings:
# - PIZZA_ADMIN_BASE_URL
# - PIZZA_ADMIN_TIMEOUT_SECS
# - PIZZA_ADMIN_STATE_DIR
# - PIZZA_ADMIN_LOG_LEVEL
# - PIZZA_ADMIN_LOG_FORMAT

[api]
# Backend base URL (without the /api suffix)
base_url = "http://localhost:5000"

# Request timeout in seconds
request_timeout_secs = 30

[session]
# Directory for the persisted login token
state_dir = "~/.local/share/pizza-admin"

# Password given to customers created from the admin client
default_customer_password = "defaultPassword123"

[logging]
# Log level: trace, debug, info, warn, error
level = "warn"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
