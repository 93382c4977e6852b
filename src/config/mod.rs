//! Configuration system for modelquill.
//!
//! This module provides the configuration structure for modelquill with
//! sensible defaults and support for serialization/deserialization via
//! serde. Configuration is loaded from a TOML file and merged with
//! command-line arguments (CLI flags win).
//!
//! # Example
//!
//! ```
//! use modelquill::config::Config;
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.unknown_fields, "skip");
//!
//! // Create custom configuration
//! let strict = Config {
//!     unknown_fields: "error".to_string(),
//!     ..Config::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

/// Configuration for the modelquill application.
///
/// # Fields
///
/// * `unknown_fields` - Policy for JSON fields with no schema declaration:
///   "skip" (record a warning, continue) or "error" (default: "skip")
/// * `pretty` - Pretty-print JSON output (default: true)
/// * `show_warnings` - Print parse warnings to stderr (default: true)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Policy for JSON fields with no schema declaration
    #[serde(default = "default_unknown_fields")]
    pub unknown_fields: String,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,

    /// Print parse warnings (e.g. skipped fields) to stderr
    #[serde(default = "default_show_warnings")]
    pub show_warnings: bool,
}

/// Returns the default unknown-field policy.
fn default_unknown_fields() -> String {
    "skip".to_string()
}

/// Returns the default for pretty-printing.
fn default_pretty() -> bool {
    true
}

/// Returns the default for showing warnings.
fn default_show_warnings() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            unknown_fields: default_unknown_fields(),
            pretty: default_pretty(),
            show_warnings: default_show_warnings(),
        }
    }
}

impl Config {
    /// Returns the path of the default config file.
    pub fn config_path() -> Option<std::path::PathBuf> {
        dirs::config_dir().map(|mut path| {
            path.push("modelquill");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or
    /// can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(&config_path) {
            Ok(contents) => toml::from_str(&contents).unwrap_or_else(|_| Self::default()),
            Err(_) => Self::default(),
        }
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(&config_path, toml_string)?;

        Ok(())
    }
}
