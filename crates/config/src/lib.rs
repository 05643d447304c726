//! ReelShelf Configuration System
//!
//! Settings for the NFO toolkit, stored as TOML in the platform config
//! directory. Each section implements the `ConfigSection` trait so it can
//! validate and merge itself.
//!
//! - **Graceful degradation**: a missing file means defaults
//! - **Atomic writes**: config files are never left half-written
//! - **Overrides**: `REELSHELF_*` environment variables win over the file
//!
//! # Example
//!
//! ```rust
//! use reelshelf_config::{Config, ConfigManager};
//!
//! let dir = tempfile::tempdir().expect("Failed to create temp dir");
//! let manager = ConfigManager::with_directory(dir.path().to_path_buf())
//!     .expect("Failed to initialize config");
//! let config = manager.load().unwrap_or_else(|e| {
//!     eprintln!("Config error: {}, using defaults", e);
//!     Config::default()
//! });
//!
//! assert_eq!(config.nfo.placeholder, "----");
//! ```

mod error;
mod manager;
mod persistence;
mod validation;

pub mod app_config;
pub mod nfo_config;

pub use error::{ConfigError, ConfigResult, ValidationError};
pub use manager::{apply_env_overrides, ConfigManager, ENV_PREFIX};
pub use persistence::ConfigPersistence;
pub use validation::{ConfigSection, Validator};

pub use app_config::{AppConfig, LogLevel};
pub use nfo_config::NfoConfig;

use serde::{Deserialize, Serialize};

/// Current config file format version
pub const CONFIG_VERSION: u32 = 1;

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Config file format version
    pub version: u32,

    /// Application-level settings
    pub app: AppConfig,

    /// How NFO files are written
    pub nfo: NfoConfig,
}

impl Config {
    /// Creates a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the entire configuration
    ///
    /// Returns all validation errors found across all sections.
    pub fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let mut errors = Vec::new();

        if let Err(mut e) = self.app.validate() {
            errors.append(&mut e);
        }

        if let Err(mut e) = self.nfo.validate() {
            errors.append(&mut e);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Merges this config with another, preferring values from `other`
    ///
    /// Override chain: defaults < file < env vars < CLI args
    pub fn merge(&mut self, other: Config) {
        self.app.merge(other.app);
        self.nfo.merge(other.nfo);
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            app: AppConfig::default(),
            nfo: NfoConfig::default(),
        }
    }
}
