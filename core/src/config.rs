//! Configuration management (config.toml)
//!
//! Settings are stored in TOML format in the platform-specific config
//! directory. Every section and field is optional; missing values fall back
//! to the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::auth::AuthConfig;
use crate::render::RenderConfig;
use crate::round::EngineConfig;
use crate::runtime::RuntimeConfig;

/// File name inside the config directory.
pub const CONFIG_FILE: &str = "config.toml";

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    /// Round engine and crash source
    #[serde(default)]
    pub engine: EngineConfig,
    /// Scene rendering
    #[serde(default)]
    pub render: RenderConfig,
    /// Host frame loop
    #[serde(default)]
    pub runtime: RuntimeConfig,
    /// Account service
    #[serde(default)]
    pub auth: AuthConfig,
}

impl Config {
    /// Engine settings with the render-side glyph size applied.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            aeroplane_size: self.render.aeroplane_size,
            ..self.engine.clone()
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("could not determine the config directory")]
    NoConfigDir,
}

/// Returns the platform-specific configuration directory.
///
/// On Windows: `%APPDATA%\Aviator\config`
/// On macOS: `~/Library/Application Support/io.aviator.Aviator`
/// On Linux: `~/.config/Aviator`
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("io.aviator", "", "Aviator").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Path of the default config file, if a home directory exists.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the config directory.
///
/// Returns defaults if the file doesn't exist or cannot be parsed.
pub fn load() -> Config {
    let Some(path) = config_path() else {
        return Config::default();
    };
    if !path.exists() {
        debug!(path = %path.display(), "No config file, using defaults");
        return Config::default();
    }
    match load_from(&path) {
        Ok(config) => config,
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unreadable config");
            Config::default()
        }
    }
}

/// Loads a configuration file from an explicit path.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Saves the configuration to the config directory, creating it if needed.
pub fn save(config: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path().ok_or(ConfigError::NoConfigDir)?;
    save_to(config, &path)?;
    Ok(path)
}

/// Writes the configuration as pretty TOML.
pub fn save_to(config: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
