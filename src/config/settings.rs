//! Configuration sections

use std::{
    net::{SocketAddr, ToSocketAddrs},
    time::Duration,
};

use serde::{Deserialize, Serialize};

use crate::error::{BridgeError, Result};

fn default_engine_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_engine_model() -> String {
    "gpt-oss:20b".to_string()
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_served_model_name() -> String {
    "gpt-oss-20b".to_string()
}

fn default_hosted_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_hosted_model() -> String {
    "gpt-3.5-turbo".to_string()
}

/// Local engine connection settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Engine base URL
    #[serde(default = "default_engine_url")]
    pub base_url: String,

    /// Model identifier passed to the engine
    #[serde(default = "default_engine_model")]
    pub model: String,

    /// Per-call timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            base_url: default_engine_url(),
            model: default_engine_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl EngineSettings {
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Inbound HTTP surface settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Model name reported in responses
    #[serde(default = "default_served_model_name")]
    pub served_model_name: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            served_model_name: default_served_model_name(),
        }
    }
}

impl ServerSettings {
    /// Resolve the listen address
    ///
    /// # Errors
    ///
    /// Returns an error if the host does not resolve
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        let invalid = |reason: String| {
            BridgeError::ConfigValidation(format!(
                "invalid listen address {}:{}: {reason}",
                self.host, self.port
            ))
        };

        (self.host.as_str(), self.port)
            .to_socket_addrs()
            .map_err(|e| invalid(e.to_string()))?
            .next()
            .ok_or_else(|| invalid("no address found".to_string()))
    }
}

/// Hosted provider settings (the key is never stored here)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HostedSettings {
    #[serde(default = "default_hosted_url")]
    pub base_url: String,

    #[serde(default = "default_hosted_model")]
    pub model: String,
}

impl Default for HostedSettings {
    fn default() -> Self {
        Self {
            base_url: default_hosted_url(),
            model: default_hosted_model(),
        }
    }
}
