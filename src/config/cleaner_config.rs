//! User configuration stored in ~/.gi-cleaner/config.toml

use crate::core::error::{CleanerError, Result};
use crate::core::DEFAULT_IGNORE_FILE;
use directories::UserDirs;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Directory under the home directory holding the configuration file
const CONFIG_DIR_NAME: &str = ".gi-cleaner";
const CONFIG_FILE_NAME: &str = "config.toml";

/// Configuration for gi-cleaner
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanerConfig {
    /// Scanning configuration
    #[serde(default)]
    pub scan: ScanConfig,
    /// Cleaning configuration
    #[serde(default)]
    pub clean: CleanConfig,
}

/// Scanning configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Name of the per-directory ignore file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_file: Option<String>,
}

/// Cleaning configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CleanConfig {
    /// Ask before deleting
    #[serde(skip_serializing_if = "Option::is_none")]
    pub confirm: Option<bool>,
    /// Refuse to clean a directory without its own ignore file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub require_root_ignore: Option<bool>,
}

/// Configuration value types
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    String(String),
    Boolean(bool),
}

impl fmt::Display for ConfigValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigValue::String(s) => f.write_str(s),
            ConfigValue::Boolean(b) => write!(f, "{}", b),
        }
    }
}

/// Configuration key for getting and setting values
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ScanIgnoreFile,
    CleanConfirm,
    CleanRequireRootIgnore,
}

impl ConfigKey {
    /// Every known key, in listing order
    pub const ALL: [ConfigKey; 3] = [
        ConfigKey::CleanConfirm,
        ConfigKey::CleanRequireRootIgnore,
        ConfigKey::ScanIgnoreFile,
    ];

    pub fn parse(key: &str) -> Option<Self> {
        match key {
            "scan.ignore_file" => Some(ConfigKey::ScanIgnoreFile),
            "clean.confirm" => Some(ConfigKey::CleanConfirm),
            "clean.require_root_ignore" => Some(ConfigKey::CleanRequireRootIgnore),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::ScanIgnoreFile => "scan.ignore_file",
            ConfigKey::CleanConfirm => "clean.confirm",
            ConfigKey::CleanRequireRootIgnore => "clean.require_root_ignore",
        }
    }

    /// Parse a value given as text on the command line for this key
    pub fn parse_value(&self, raw: &str) -> Result<ConfigValue> {
        match self {
            ConfigKey::ScanIgnoreFile => Ok(ConfigValue::String(raw.to_string())),
            ConfigKey::CleanConfirm | ConfigKey::CleanRequireRootIgnore => {
                match raw.to_ascii_lowercase().as_str() {
                    "true" | "yes" | "on" | "1" => Ok(ConfigValue::Boolean(true)),
                    "false" | "no" | "off" | "0" => Ok(ConfigValue::Boolean(false)),
                    _ => Err(CleanerError::configuration(format!(
                        "{} must be a boolean, got '{}'",
                        self.as_str(),
                        raw
                    ))),
                }
            }
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl CleanerConfig {
    /// Load configuration from the user's home directory
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::get_config_path()?)
    }

    /// Load configuration from a file; a missing file gives the defaults
    pub fn load_from(config_path: &Path) -> Result<Self> {
        if !config_path.exists() {
            return Ok(Self::default());
        }

        debug!(path = %config_path.display(), "loading configuration");
        let content = fs::read_to_string(config_path)?;
        let config: CleanerConfig = toml::from_str(&content).map_err(|e| {
            CleanerError::configuration(format!("Failed to parse config: {}", e))
        })?;

        Ok(config)
    }

    /// Save configuration to the user's home directory
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Save configuration to a file, creating its directory if needed
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self).map_err(|e| {
            CleanerError::configuration(format!("Failed to serialize config: {}", e))
        })?;

        fs::write(config_path, content)?;
        Ok(())
    }

    /// Get the path to the configuration file
    pub fn get_config_path() -> Result<PathBuf> {
        let user_dirs = UserDirs::new().ok_or(CleanerError::HomeDirectoryNotFound)?;

        Ok(user_dirs
            .home_dir()
            .join(CONFIG_DIR_NAME)
            .join(CONFIG_FILE_NAME))
    }

    /// Get an explicitly set configuration value
    pub fn get(&self, key: ConfigKey) -> Option<ConfigValue> {
        match key {
            ConfigKey::ScanIgnoreFile => self.scan.ignore_file.clone().map(ConfigValue::String),
            ConfigKey::CleanConfirm => self.clean.confirm.map(ConfigValue::Boolean),
            ConfigKey::CleanRequireRootIgnore => {
                self.clean.require_root_ignore.map(ConfigValue::Boolean)
            }
        }
    }

    /// Get a configuration value, falling back to its default
    pub fn get_or_default(&self, key: ConfigKey) -> ConfigValue {
        self.get(key).unwrap_or_else(|| match key {
            ConfigKey::ScanIgnoreFile => ConfigValue::String(DEFAULT_IGNORE_FILE.to_string()),
            ConfigKey::CleanConfirm | ConfigKey::CleanRequireRootIgnore => {
                ConfigValue::Boolean(true)
            }
        })
    }

    /// Set a configuration value
    pub fn set(&mut self, key: ConfigKey, value: ConfigValue) -> Result<()> {
        match (key, value) {
            (ConfigKey::ScanIgnoreFile, ConfigValue::String(name)) => {
                if name.is_empty() || name.contains('/') || name == "." || name == ".." {
                    return Err(CleanerError::configuration(
                        "scan.ignore_file must be a plain file name",
                    ));
                }
                self.scan.ignore_file = Some(name);
            }
            (ConfigKey::CleanConfirm, ConfigValue::Boolean(enabled)) => {
                self.clean.confirm = Some(enabled);
            }
            (ConfigKey::CleanRequireRootIgnore, ConfigValue::Boolean(enabled)) => {
                self.clean.require_root_ignore = Some(enabled);
            }
            (ConfigKey::ScanIgnoreFile, _) => {
                return Err(CleanerError::configuration("scan.ignore_file must be a string"));
            }
            (key, _) => {
                return Err(CleanerError::configuration(format!(
                    "{} must be a boolean",
                    key
                )));
            }
        }
        Ok(())
    }

    /// Unset a configuration value
    pub fn unset(&mut self, key: ConfigKey) {
        match key {
            ConfigKey::ScanIgnoreFile => self.scan.ignore_file = None,
            ConfigKey::CleanConfirm => self.clean.confirm = None,
            ConfigKey::CleanRequireRootIgnore => self.clean.require_root_ignore = None,
        }
    }

    /// List all effective configuration values, sorted by key
    pub fn list(&self) -> Vec<(String, String)> {
        ConfigKey::ALL
            .iter()
            .map(|key| (key.as_str().to_string(), self.get_or_default(*key).to_string()))
            .collect()
    }

    /// Ignore file name to look for in each directory
    pub fn ignore_file_name(&self) -> &str {
        self.scan.ignore_file.as_deref().unwrap_or(DEFAULT_IGNORE_FILE)
    }

    /// Whether to ask before deleting
    pub fn confirm(&self) -> bool {
        self.clean.confirm.unwrap_or(true)
    }

    /// Whether the scanned directory must have its own ignore file
    pub fn require_root_ignore(&self) -> bool {
        self.clean.require_root_ignore.unwrap_or(true)
    }
}
