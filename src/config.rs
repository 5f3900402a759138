//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::dashboard::units::DisplayUnit;

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub scale: ScaleSection,

    #[serde(default)]
    pub dashboard: DashboardSection,

    #[serde(default)]
    pub display: DisplaySection,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Scale server connection configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ScaleSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_request_timeout")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String {
    // The firmware serves its API on port 8080
    "http://localhost:8080".to_string()
}

fn default_request_timeout() -> u64 {
    5000
}

impl Default for ScaleSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_ms: default_request_timeout(),
        }
    }
}

/// Poll loop configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardSection {
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_disconnect_notice")]
    pub disconnect_notice_ms: u64,
}

fn default_poll_interval() -> u64 {
    1000
}

fn default_disconnect_notice() -> u64 {
    2000
}

impl Default for DashboardSection {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval(),
            disconnect_notice_ms: default_disconnect_notice(),
        }
    }
}

/// Display preferences
#[derive(Debug, Clone, Deserialize)]
pub struct DisplaySection {
    #[serde(default = "default_unit")]
    pub unit: DisplayUnit,
}

fn default_unit() -> DisplayUnit {
    DisplayUnit::Oz
}

impl Default for DisplaySection {
    fn default() -> Self {
        Self {
            unit: default_unit(),
        }
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
    "info".to_string()
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

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        Ok(config)
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
            dirs::config_dir().map(|p| p.join("fluidwatch").join("config.toml")),
            Some(PathBuf::from("./fluidwatch.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        let mut config = Config::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides to an existing config
    pub fn apply_env_overrides(&mut self) {
        if let Ok(url) = std::env::var("FLUIDWATCH_SCALE_URL") {
            self.scale.base_url = url;
        }
        if let Ok(interval) = std::env::var("FLUIDWATCH_POLL_INTERVAL_MS") {
            if let Ok(ms) = interval.parse() {
                self.dashboard.poll_interval_ms = ms;
            }
        }
        if let Ok(unit) = std::env::var("FLUIDWATCH_UNIT") {
            if let Some(u) = DisplayUnit::parse(&unit) {
                self.display.unit = u;
            }
        }
        if let Ok(level) = std::env::var("FLUIDWATCH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("FLUIDWATCH_LOG_FORMAT") {
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
    r#"# fluidwatch Configuration
#
# Environment variables override these settings:
# - FLUIDWATCH_SCALE_URL
# - FLUIDWATCH_POLL_INTERVAL_MS
# - FLUIDWATCH_UNIT
# - FLUIDWATCH_LOG_LEVEL
# - FLUIDWATCH_LOG_FORMAT

[scale]
# Base URL of the scale server
base_url = "http://localhost:8080"

# HTTP request timeout (ms)
request_timeout_ms = 5000

[dashboard]
# How often to poll the scale (ms)
poll_interval_ms = 1000

# How long the scale must be unreachable before the
# "connection lost" notice fires (ms)
disconnect_notice_ms = 2000

[display]
# Startup display unit: "oz" (fluid ounces) or "g" (grams)
unit = "oz"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}
