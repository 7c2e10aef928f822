//! Configuration management for ollama-bridge
//!
//! Settings are layered, lowest priority first:
//! 1. Built-in defaults
//! 2. Config file (`<config dir>/ollama-bridge/config.json` or `--config PATH`)
//! 3. Environment variables and CLI flags (`BRIDGE_*`, resolved by clap)

pub mod settings;

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};

pub use self::settings::{EngineSettings, HostedSettings, ServerSettings};
use crate::{
    adapter::Policy,
    error::{BridgeError, Result},
};

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineSettings,

    #[serde(default)]
    pub server: ServerSettings,

    #[serde(default)]
    pub hosted: HostedSettings,

    /// Request policy applied by the adapter
    #[serde(default)]
    pub policy: Policy,
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub engine_url: Option<String>,
    pub model: Option<String>,
    pub timeout_secs: Option<u64>,
    pub host: Option<String>,
    pub port: Option<u16>,
    pub served_model_name: Option<String>,
    pub policy: Option<Policy>,
}

impl Config {
    /// Load configuration from `path`, or from the default location
    ///
    /// An explicit path must exist; a missing default file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) if !path.exists() => Err(BridgeError::ConfigParse {
                path: path.to_path_buf(),
                message: "file not found".to_string(),
            }),
            Some(path) => Self::load_from_path(path),
            None => Self::load_from_path(&Self::default_config_path()),
        }
    }

    /// Load configuration from a specific path, falling back to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path).map_err(|e| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        serde_json::from_str(&contents).map_err(|e| BridgeError::ConfigParse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Save configuration to a specific path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = serde_json::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get the configuration directory path
    #[must_use]
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("ollama-bridge")
    }

    /// Get the default config file path
    #[must_use]
    pub fn default_config_path() -> PathBuf {
        Self::config_dir().join("config.json")
    }

    /// Apply command-line and environment overrides on top of file values
    pub fn apply(&mut self, overrides: Overrides) {
        if let Some(url) = overrides.engine_url {
            self.engine.base_url = url;
        }
        if let Some(model) = overrides.model {
            self.engine.model = model;
        }
        if let Some(secs) = overrides.timeout_secs {
            self.engine.timeout_secs = secs;
        }
        if let Some(host) = overrides.host {
            self.server.host = host;
        }
        if let Some(port) = overrides.port {
            self.server.port = port;
        }
        if let Some(name) = overrides.served_model_name {
            self.server.served_model_name = name;
        }
        if let Some(policy) = overrides.policy {
            self.policy = policy;
        }
    }

    /// Check the merged configuration before use
    ///
    /// # Errors
    ///
    /// Returns [`BridgeError::ConfigValidation`] describing the first problem found
    pub fn validate(&self) -> Result<()> {
        if !(self.engine.base_url.starts_with("http://")
            || self.engine.base_url.starts_with("https://"))
        {
            return Err(BridgeError::ConfigValidation(format!(
                "engine URL must start with http:// or https://, got {}",
                self.engine.base_url
            )));
        }
        if self.engine.model.trim().is_empty() {
            return Err(BridgeError::ConfigValidation(
                "engine model must not be empty".to_string(),
            ));
        }
        if self.engine.timeout_secs == 0 {
            return Err(BridgeError::ConfigValidation(
                "timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}
