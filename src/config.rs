//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub dashboard: DashboardConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Host header allow-list. Empty list disables the check.
    #[serde(default)]
    pub allowed_hosts: Vec<String>,

    /// Maximum concurrent WebSocket sessions
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_sessions() -> usize {
    64
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            allowed_hosts: Vec::new(),
            max_sessions: default_max_sessions(),
        }
    }
}

impl ServerConfig {
    /// Get the socket address string
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Dashboard configuration
#[derive(Debug, Clone, Deserialize)]
pub struct DashboardConfig {
    /// Page title
    #[serde(default = "default_title")]
    pub title: String,

    /// Chart title shown above the plot
    #[serde(default = "default_chart_title")]
    pub chart_title: String,

    /// Y axis label shown on the chart
    #[serde(default = "default_value_label")]
    pub value_label: String,

    /// Initial sample count
    #[serde(default = "default_samples")]
    pub default_samples: usize,

    /// Initial reference year
    #[serde(default = "default_year")]
    pub default_year: i32,

    /// Initial cumulative toggle state
    #[serde(default)]
    pub default_cumulative: bool,

    /// Background reference period as [start, end) years
    #[serde(default = "default_reference_period")]
    pub reference_period: [i32; 2],

    /// Base seed for the synthetic noise generator
    #[serde(default = "default_noise_seed")]
    pub noise_seed: u64,

    /// Preset palette used for the chart
    #[serde(default = "default_palette")]
    pub palette: String,
}

fn default_title() -> String {
    "Sinedash".to_string()
}

fn default_chart_title() -> String {
    "Runoff".to_string()
}

fn default_value_label() -> String {
    "Runoff (Mt)".to_string()
}

fn default_samples() -> usize {
    200
}

fn default_year() -> i32 {
    2017
}

fn default_reference_period() -> [i32; 2] {
    [2015, 2020]
}

fn default_noise_seed() -> u64 {
    20_170_101
}

fn default_palette() -> String {
    "lines_jet_r".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            chart_title: default_chart_title(),
            value_label: default_value_label(),
            default_samples: default_samples(),
            default_year: default_year(),
            default_cumulative: false,
            reference_period: default_reference_period(),
            noise_seed: default_noise_seed(),
            palette: default_palette(),
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

        config.validate()?;
        Ok(config)
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
            dirs::config_dir().map(|p| p.join("sinedash").join("config.toml")),
            Some(PathBuf::from("/etc/sinedash/config.toml")),
            Some(PathBuf::from("./config.toml")),
        ];

        for path_opt in config_paths.iter().flatten() {
            if path_opt.exists() {
                match Self::load_with_env(path_opt) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path_opt);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path_opt, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env()
    }

    /// Apply environment variable overrides to an existing config
    fn apply_env_overrides(&mut self) {
        if let Ok(host) = std::env::var("SINEDASH_HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("SINEDASH_PORT") {
            if let Ok(p) = port.parse() {
                self.server.port = p;
            }
        }

        if let Ok(title) = std::env::var("SINEDASH_TITLE") {
            self.dashboard.title = title;
        }

        if let Ok(level) = std::env::var("SINEDASH_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Ok(format) = std::env::var("SINEDASH_LOG_FORMAT") {
            self.logging.format = format;
        }
    }

    /// Reject configurations the dashboard cannot serve
    fn validate(&self) -> Result<(), ConfigError> {
        let [start, end] = self.dashboard.reference_period;
        if start >= end {
            return Err(ConfigError::Invalid(format!(
                "reference_period start ({}) must be before end ({})",
                start, end
            )));
        }
        if self.server.max_sessions == 0 {
            return Err(ConfigError::Invalid(
                "max_sessions must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            dashboard: DashboardConfig::default(),
            logging: LoggingConfig::default(),
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

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r#"# Sinedash Configuration
#
# Environment variables override these settings:
# - SINEDASH_HOST
# - SINEDASH_PORT
# - SINEDASH_TITLE
# - SINEDASH_LOG_LEVEL
# - SINEDASH_LOG_FORMAT

[server]
# Server host
host = "0.0.0.0"

# Server port
port = 8080

# Host header allow-list; leave empty to accept any host
allowed_hosts = []

# Maximum concurrent dashboard sessions
max_sessions = 64

[dashboard]
# Page title
title = "Sinedash"

# Chart title and y axis label
chart_title = "Runoff"
value_label = "Runoff (Mt)"

# Initial widget values
default_samples = 200
default_year = 2017
default_cumulative = false

# Background reference period, [start, end) years
reference_period = [2015, 2020]

# Base seed for the synthetic noise generator
noise_seed = 20170101

# Preset palette for the chart
palette = "lines_jet_r"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"#
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.dashboard.default_samples, 200);
        assert_eq!(config.dashboard.default_year, 2017);
        assert!(!config.dashboard.default_cumulative);
        assert_eq!(config.dashboard.reference_period, [2015, 2020]);
    }

    #[test]
    fn test_generated_config_parses() {
        let config: Config = toml::from_str(&generate_default_config()).unwrap();
        assert_eq!(config.dashboard.title, "Sinedash");
        assert_eq!(config.server.max_sessions, 64);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            "[server]\nport = 9000\n\n[dashboard]\ntitle = \"Test\"\n"
        )
        .unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.dashboard.title, "Test");
        // Unspecified sections keep their defaults
        assert_eq!(config.dashboard.default_year, 2017);
    }

    #[test]
    fn test_invalid_reference_period() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[dashboard]\nreference_period = [2020, 2015]\n").unwrap();

        let result = Config::load(file.path());
        assert!(matches!(result, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_addr() {
        let server = ServerConfig::default();
        assert_eq!(server.addr(), "0.0.0.0:8080");
    }
}
