//! Configuration management for SpellDeck.
//!
//! Configuration is loaded from the platform config directory with sensible
//! defaults. A missing file is not an error; every section falls back to its
//! `Default` impl.

mod types;
mod validate;

pub use types::*;

use crate::error::ConfigError;
use crate::service::resolve_env_var;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable consulted when the config does not name one.
pub const DEFAULT_API_KEY_VAR: &str = "OPENAI_API_KEY";

/// Root configuration structure for SpellDeck.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Remote service settings
    pub openai: OpenAiConfig,

    /// Speech synthesis fan-out
    pub synthesis: SynthesisConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Returns default configuration if the file doesn't exist.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Get the default config file path.
    ///
    /// - macOS: ~/Library/Application Support/com.spelldeck.spelldeck/config.toml
    /// - Linux: ~/.config/spelldeck/config.toml
    ///
    /// Falls back to ~/.spelldeck/config.toml if directory detection fails.
    pub fn default_path() -> PathBuf {
        directories::ProjectDirs::from("com", "spelldeck", "spelldeck")
            .map(|dirs| dirs.config_dir().to_path_buf().join("config.toml"))
            .unwrap_or_else(|| {
                let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
                PathBuf::from(home).join(".spelldeck").join("config.toml")
            })
    }

    /// Resolve the service credential.
    ///
    /// `openai.api_key` may hold a literal key or a `${VAR}` reference.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        resolve_env_var(&self.openai.api_key).ok_or_else(|| {
            let var = self
                .openai
                .api_key
                .strip_prefix("${")
                .and_then(|rest| rest.strip_suffix('}'))
                .unwrap_or(DEFAULT_API_KEY_VAR);
            ConfigError::MissingCredential(var.to_string())
        })
    }

    /// Serialize the config to a pretty TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Expand a leading `~` in a user-supplied path.
pub fn expand_path(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}
