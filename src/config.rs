//! Configuration management for the colorwheel service
//!
//! Defaults, optional TOML file, `COLORWHEEL_*` environment overrides and
//! validation, in that order.

use crate::accounts::DEFAULT_STARTING_BALANCE;
use crate::errors::{ColorwheelResult, ConfigurationError};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// Complete service configuration
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ColorwheelConfig {
    pub game: GameConfig,
    pub server: ServerConfig,
    pub logging: LoggingConfig,
}

/// Ledger rules
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GameConfig {
    /// Balance credited to an account on first touch
    pub starting_balance: i64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_balance: DEFAULT_STARTING_BALANCE,
        }
    }
}

/// HTTP listener settings
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub allowed_origins: Vec<String>,
    pub request_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            allowed_origins: vec!["*".to_string()],
            request_timeout_secs: 30,
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive used when `RUST_LOG` is unset
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "colorwheel=info,tower_http=info".to_string(),
        }
    }
}

/// Configuration loader with environment variable support
#[derive(Debug, Default)]
pub struct ConfigLoader {
    config_path: Option<String>,
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self { config_path: None }
    }

    /// Set the configuration file path
    pub fn with_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_string_lossy().to_string());
        self
    }

    /// Load configuration from file and environment variables
    pub fn load(&self) -> ColorwheelResult<ColorwheelConfig> {
        let mut config = match self.config_path {
            Some(ref path) => self.load_from_file(path)?,
            None => ColorwheelConfig::default(),
        };

        self.apply_env_overrides(&mut config)?;
        self.validate(&config)?;

        Ok(config)
    }

    fn load_from_file(&self, path: &str) -> ColorwheelResult<ColorwheelConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to read {}: {}", path, e)))?;

        toml::from_str(&content)
            .map_err(|e| ConfigurationError::LoadFailed(format!("Failed to parse TOML: {}", e)).into())
    }

    fn apply_env_overrides(&self, config: &mut ColorwheelConfig) -> ColorwheelResult<()> {
        if let Ok(host) = env::var("COLORWHEEL_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("COLORWHEEL_PORT") {
            config.server.port = parse_env("COLORWHEEL_PORT", port, "Invalid port number")?;
        }
        if let Ok(balance) = env::var("COLORWHEEL_STARTING_BALANCE") {
            config.game.starting_balance =
                parse_env("COLORWHEEL_STARTING_BALANCE", balance, "Invalid integer")?;
        }
        if let Ok(filter) = env::var("COLORWHEEL_LOG") {
            config.logging.filter = filter;
        }

        Ok(())
    }

    /// Validate configuration values
    pub fn validate(&self, config: &ColorwheelConfig) -> ColorwheelResult<()> {
        if config.server.host.is_empty() {
            return Err(ConfigurationError::MissingRequired("server.host".to_string()).into());
        }

        if config.server.port == 0 {
            return Err(invalid("server.port", "0", "Port cannot be zero"));
        }

        if config.server.request_timeout_secs == 0 {
            return Err(invalid(
                "server.request_timeout_secs",
                "0",
                "Timeout must be at least 1 second",
            ));
        }

        if config.game.starting_balance <= 0 {
            return Err(invalid(
                "game.starting_balance",
                &config.game.starting_balance.to_string(),
                "Starting balance must be positive",
            ));
        }

        Ok(())
    }

    /// Save configuration to file
    pub fn save(&self, config: &ColorwheelConfig, path: &str) -> ColorwheelResult<()> {
        let toml_string = toml::to_string_pretty(config)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(path, toml_string)
            .map_err(|e| ConfigurationError::SaveFailed(format!("Failed to write to {}: {}", path, e)).into())
    }
}

fn parse_env<T: std::str::FromStr>(field: &str, value: String, reason: &str) -> ColorwheelResult<T> {
    value.parse().map_err(|_| {
        ConfigurationError::InvalidValue {
            field: field.to_string(),
            value,
            reason: reason.to_string(),
        }
        .into()
    })
}

fn invalid(field: &str, value: &str, reason: &str) -> crate::errors::ColorwheelError {
    ConfigurationError::InvalidValue {
        field: field.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
    .into()
}

/// Generate a sample configuration file
pub fn generate_sample_config(path: &str) -> ColorwheelResult<()> {
    ConfigLoader::new().save(&ColorwheelConfig::default(), path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = ColorwheelConfig::default();
        assert_eq!(config.game.starting_balance, 1000);
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.server.allowed_origins, vec!["*".to_string()]);
    }

    #[test]
    fn test_config_validation() {
        let loader = ConfigLoader::new();
        let mut config = ColorwheelConfig::default();

        assert!(loader.validate(&config).is_ok());

        config.server.port = 0;
        assert!(loader.validate(&config).is_err());

        config = ColorwheelConfig::default();
        config.game.starting_balance = 0;
        assert!(loader.validate(&config).is_err());

        config = ColorwheelConfig::default();
        config.server.request_timeout_secs = 0;
        assert!(loader.validate(&config).is_err());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: ColorwheelConfig = toml::from_str("[game]\nstarting_balance = 250\n").unwrap();

        assert_eq!(config.game.starting_balance, 250);
        assert_eq!(config.server, ServerConfig::default());
    }

    #[test]
    fn test_save_and_load_config() -> ColorwheelResult<()> {
        let temp_file = NamedTempFile::new()?;
        let path = temp_file.path().to_str().unwrap();

        let mut original = ColorwheelConfig::default();
        original.server.port = 8088;
        ConfigLoader::new().save(&original, path)?;

        let loaded = ConfigLoader::new().with_path(path).load_from_file(path)?;
        assert_eq!(loaded, original);

        Ok(())
    }

    #[test]
    fn test_missing_file_is_load_error() {
        let result = ConfigLoader::new().load_from_file("/nonexistent/colorwheel.toml");
        assert!(matches!(
            result,
            Err(crate::errors::ColorwheelError::Configuration(ConfigurationError::LoadFailed(_)))
        ));
    }
}
