//! Configuration manager - main API for config operations

use crate::persistence::ConfigPersistence;
use crate::{Config, ConfigError, ConfigResult, LogLevel};
use directories::ProjectDirs;
use std::path::PathBuf;

/// Prefix shared by every environment override
pub const ENV_PREFIX: &str = "REELSHELF";

const CONFIG_FILE_NAME: &str = "config.toml";

/// Main configuration manager
///
/// Handles file paths, defaults and validation around [`ConfigPersistence`].
pub struct ConfigManager {
    persistence: ConfigPersistence,
    config_dir: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager using the default config directory
    ///
    /// - Linux: `~/.config/reelshelf/`
    /// - macOS: `~/Library/Application Support/reelshelf/`
    /// - Windows: `%APPDATA%\reelshelf\`
    pub fn new() -> ConfigResult<Self> {
        let config_dir = Self::default_config_dir()?;
        Self::with_directory(config_dir)
    }

    /// Creates a config manager with a custom config directory
    pub fn with_directory(config_dir: PathBuf) -> ConfigResult<Self> {
        let persistence = ConfigPersistence::new(config_dir.join(CONFIG_FILE_NAME));

        Ok(Self {
            persistence,
            config_dir,
        })
    }

    fn default_config_dir() -> ConfigResult<PathBuf> {
        ProjectDirs::from("", "", "reelshelf")
            .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
            .ok_or_else(|| ConfigError::PathResolutionError {
                reason: "Could not determine user config directory".to_string(),
            })
    }

    /// Returns the config directory path
    pub fn config_dir(&self) -> &PathBuf {
        &self.config_dir
    }

    /// Returns the full config file path
    pub fn config_path(&self) -> PathBuf {
        self.persistence.config_path().to_path_buf()
    }

    /// Loads the configuration from file
    ///
    /// If the file doesn't exist, returns default configuration.
    pub fn load(&self) -> ConfigResult<Config> {
        self.persistence.load()
    }

    /// Loads the configuration, falling back to defaults on any error
    pub fn load_or_default(&self) -> Config {
        match self.load() {
            Ok(config) => config,
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                Config::default()
            }
        }
    }

    /// Saves the configuration to file
    pub fn save(&self, config: &Config) -> ConfigResult<()> {
        self.persistence.save(config)
    }

    /// Loads the current config, applies `update_fn` and saves the result
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// # use reelshelf_config::ConfigManager;
    /// # let manager = ConfigManager::new().expect("config dir");
    /// manager.update(|config| {
    ///     config.nfo.placeholder = "N/A".to_string();
    /// }).expect("Failed to update config");
    /// ```
    pub fn update<F>(&self, update_fn: F) -> ConfigResult<()>
    where
        F: FnOnce(&mut Config),
    {
        let mut config = self.load()?;
        update_fn(&mut config);
        self.save(&config)
    }

    /// Writes a default config file if none exists
    ///
    /// Returns `Ok(true)` if a new file was created.
    pub fn initialize(&self) -> ConfigResult<bool> {
        if self.config_path().exists() {
            log::info!(
                "Config file already exists at {}",
                self.config_path().display()
            );
            return Ok(false);
        }

        self.persistence.generate_default()?;
        Ok(true)
    }

    /// Overwrites the config file with default values
    pub fn reset(&self) -> ConfigResult<()> {
        self.save(&Config::default())
    }

    /// Validates the current configuration file
    ///
    /// Returns every validation message, empty when valid.
    pub fn validate(&self) -> ConfigResult<Vec<String>> {
        let config = self.load()?;

        match config.validate() {
            Ok(()) => Ok(Vec::new()),
            Err(errors) => Ok(errors.iter().map(|e| e.to_string()).collect()),
        }
    }

    /// Loads the config file and applies `REELSHELF_SECTION_FIELD` overrides
    ///
    /// Recognized variables: `REELSHELF_APP_LOG_LEVEL`,
    /// `REELSHELF_NFO_PLACEHOLDER`, `REELSHELF_NFO_INDENT`,
    /// `REELSHELF_NFO_WRITE_BOM`.
    pub fn load_with_env_overrides(&self) -> ConfigResult<Config> {
        let config = self.load()?;
        apply_env_overrides(config, |name| std::env::var(name).ok())
    }
}

/// Applies overrides looked up by variable name
///
/// A value that does not parse is an error rather than silently ignored.
pub fn apply_env_overrides<F>(mut config: Config, lookup: F) -> ConfigResult<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |section: &str, field: &str| {
        let name = format!("{}_{}_{}", ENV_PREFIX, section, field);
        lookup(&name).map(|value| (name, value))
    };

    if let Some((name, value)) = var("APP", "LOG_LEVEL") {
        config.app.log_level = value
            .parse::<LogLevel>()
            .map_err(|_| invalid(&name, &value))?;
        log::debug!("Log level override: {}", config.app.log_level);
    }

    if let Some((_, value)) = var("NFO", "PLACEHOLDER") {
        config.nfo.placeholder = value;
    }

    if let Some((name, value)) = var("NFO", "INDENT") {
        config.nfo.indent = value
            .trim()
            .parse::<usize>()
            .map_err(|_| invalid(&name, &value))?;
    }

    if let Some((name, value)) = var("NFO", "WRITE_BOM") {
        config.nfo.write_bom = parse_flag(&value).ok_or_else(|| invalid(&name, &value))?;
    }

    if let Err(errors) = config.validate() {
        log::warn!(
            "Config validation warnings after env overrides: {:?}",
            errors
        );
    }

    Ok(config)
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn invalid(variable: &str, value: &str) -> ConfigError {
    ConfigError::EnvOverrideError {
        variable: variable.to_string(),
        value: value.to_string(),
    }
}
