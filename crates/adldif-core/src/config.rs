//! Configuration system for adldif
//!
//! Provides:
//! - Config file discovery (CLI flag, env var, standard paths)
//! - TOML parsing with serde
//! - Environment variable overrides
//! - Additions to the built-in attribute tables

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::mode::Mode;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Complete adldif configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AdldifConfig {
    /// Logging settings
    pub logging: LoggingSettings,

    /// Transformer selection
    pub transform: TransformSettings,

    /// Decoder behaviour
    pub decode: DecodeSettings,

    /// Additions to the built-in attribute tables
    pub attributes: AttributeSettings,
}

/// Logging settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// Transformer settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformSettings {
    /// Mode used when none is given on the command line: raw, clean, bof
    pub mode: String,
}

impl Default for TransformSettings {
    fn default() -> Self {
        Self {
            mode: Mode::default().to_string(),
        }
    }
}

/// Decoder settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeSettings {
    /// Pass malformed SIDs through as base64 instead of aborting the run
    pub sid_fallback: bool,
}

/// Attribute names added to the built-in tables (matched case-insensitively)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributeSettings {
    /// Never rewrite these base64 values as text
    pub skip_clean: Vec<String>,

    /// Binary SID attributes
    pub sid: Vec<String>,

    /// AD epoch timestamp attributes
    pub date: Vec<String>,

    /// Keep these base64 in bof output
    pub bof_base64: Vec<String>,

    /// Render these as bracketed GUIDs in bof output
    pub bof_bracketed: Vec<String>,

    /// Drop these from bof output
    pub bof_ignore: Vec<String>,
}

impl AdldifConfig {
    /// Configured default mode
    pub fn mode(&self) -> ConfigResult<Mode> {
        self.transform
            .mode
            .parse()
            .map_err(|e: crate::mode::UnknownMode| ConfigError::ValidationError(e.to_string()))
    }
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

type EnvLookup = Box<dyn Fn(&str) -> Option<String>>;

/// Configuration loader with file discovery
pub struct ConfigLoader {
    /// Path to config file (if specified via CLI)
    cli_path: Option<PathBuf>,

    /// Environment variable lookup
    env: EnvLookup,
}

impl ConfigLoader {
    /// Create a new config loader
    pub fn new() -> Self {
        Self {
            cli_path: None,
            env: Box::new(|key: &str| std::env::var(key).ok()),
        }
    }

    /// Read variables from a fixed table instead of the process environment
    #[cfg(test)]
    fn with_env(mut self, vars: &[(&str, &str)]) -> Self {
        let vars: std::collections::HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        self.env = Box::new(move |key: &str| vars.get(key).cloned());
        self
    }

    /// Set the config path from CLI argument
    pub fn with_cli_path(mut self, path: Option<PathBuf>) -> Self {
        self.cli_path = path;
        self
    }

    /// Load configuration with the following precedence:
    /// 1. CLI --config flag
    /// 2. ADLDIF_CONFIG environment variable
    /// 3. ~/.config/adldif/config.toml
    /// 4. /etc/adldif/config.toml
    /// 5. Default values
    pub fn load(&self) -> ConfigResult<AdldifConfig> {
        let config_path = self.find_config_file()?;

        let mut config = if let Some(path) = config_path {
            info!("Loading configuration from: {}", path.display());
            self.load_from_file(&path)?
        } else {
            debug!("No config file found, using defaults");
            AdldifConfig::default()
        };

        self.apply_env_overrides(&mut config);
        self.validate(&config)?;

        Ok(config)
    }

    /// Find the config file to use.
    ///
    /// An explicit CLI path that does not exist is an error; every other
    /// location is optional.
    fn find_config_file(&self) -> ConfigResult<Option<PathBuf>> {
        if let Some(path) = &self.cli_path {
            if path.exists() {
                return Ok(Some(path.clone()));
            }
            return Err(ConfigError::NotFound(path.clone()));
        }

        if let Some(env_path) = (self.env)("ADLDIF_CONFIG") {
            let path = PathBuf::from(&env_path);
            if path.exists() {
                return Ok(Some(path));
            }
            warn!("ADLDIF_CONFIG path does not exist: {}", env_path);
        }

        if let Some(path) = dirs::config_dir(&self.env).map(config_file_in) {
            if path.exists() {
                return Ok(Some(path));
            }
        }

        #[cfg(unix)]
        {
            let path = PathBuf::from("/etc/adldif/config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Load configuration from a TOML file
    fn load_from_file(&self, path: &Path) -> ConfigResult<AdldifConfig> {
        let content = std::fs::read_to_string(path)?;
        let config: AdldifConfig = toml::from_str(&content)?;
        Ok(config)
    }

    /// Apply environment variable overrides.
    ///
    /// An unusable value is skipped with a warning and the rest of the
    /// configuration is kept.
    fn apply_env_overrides(&self, config: &mut AdldifConfig) {
        if let Some(val) = (self.env)("ADLDIF_LOG_LEVEL") {
            if is_log_level(&val) {
                config.logging.level = val;
            } else {
                warn!("Ignoring ADLDIF_LOG_LEVEL={}: expected one of {:?}", val, LOG_LEVELS);
            }
        }
        if let Some(val) = (self.env)("ADLDIF_MODE") {
            match val.parse::<Mode>() {
                Ok(_) => config.transform.mode = val,
                Err(e) => warn!("Ignoring ADLDIF_MODE: {}", e),
            }
        }
        if let Some(val) = (self.env)("ADLDIF_SID_FALLBACK") {
            match parse_flag(&val) {
                Some(flag) => config.decode.sid_fallback = flag,
                None => warn!("Ignoring ADLDIF_SID_FALLBACK={}: expected true or false", val),
            }
        }
    }

    /// Validate configuration
    fn validate(&self, config: &AdldifConfig) -> ConfigResult<()> {
        if !is_log_level(&config.logging.level) {
            return Err(ConfigError::ValidationError(format!(
                "Invalid log level: {}. Must be one of: {:?}",
                config.logging.level, LOG_LEVELS
            )));
        }

        config.mode()?;

        Ok(())
    }
}

fn config_file_in(dir: PathBuf) -> PathBuf {
    dir.join("adldif").join("config.toml")
}

fn is_log_level(level: &str) -> bool {
    LOG_LEVELS.contains(&level.to_lowercase().as_str())
}

fn parse_flag(val: &str) -> Option<bool> {
    match val.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper module for platform-specific directories
mod dirs {
    use std::path::PathBuf;

    /// Get the user's config directory
    pub fn config_dir(env: &dyn Fn(&str) -> Option<String>) -> Option<PathBuf> {
        #[cfg(target_os = "windows")]
        {
            env("APPDATA").map(PathBuf::from)
        }

        #[cfg(not(target_os = "windows"))]
        {
            env("XDG_CONFIG_HOME")
                .map(PathBuf::from)
                .or_else(|| env("HOME").map(|h| PathBuf::from(h).join(".config")))
        }
    }
}
