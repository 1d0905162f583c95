//! Configuration file parsing for the CLI.
//!
//! Loads `hirelog.toml` with `[server]`, `[llm]`, `[classifier]` and
//! `[output]` sections. Every section and field is optional.

use hirelog_extractor::ClassifierConfig;
use hirelog_grpc::{ServerConfig, DEFAULT_PORT};
use hirelog_llm::openai::{DEFAULT_BASE_URL, DEFAULT_MODEL};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Configuration error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read config file
    #[error("Failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),

    /// Failed to parse TOML
    #[error("Failed to parse config TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// A value is out of range
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Complete CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// gRPC server settings
    pub server: ServerSection,

    /// Language model settings
    pub llm: LlmSection,

    /// Classifier settings
    pub classifier: ClassifierConfig,

    /// Terminal output settings
    pub output: OutputSettings,
}

/// `[server]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerSection {
    /// Bind address (e.g., "127.0.0.1")
    pub bind_address: String,

    /// Bind port
    pub port: u16,
}

/// `[llm]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// API root without the `/v1` suffix
    pub base_url: String,

    /// Model name
    pub model: String,

    /// Environment variable holding the API key
    pub api_key_env: String,
}

/// `[output]` section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Enable colored output
    pub color: bool,

    /// Default output format
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl AppConfig {
    /// Load configuration from `path`, or defaults when no path is given
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let config = match path {
            Some(path) => Self::from_toml(&fs::read_to_string(path)?)?,
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.classifier.validate().map_err(ConfigError::Invalid)?;
        if self.llm.api_key_env.trim().is_empty() {
            return Err(ConfigError::Invalid("llm.api_key_env must not be empty".to_string()));
        }
        Ok(())
    }

    /// gRPC server configuration for the `[server]` section
    pub fn server_config(&self) -> ServerConfig {
        ServerConfig::new(self.server.bind_address.clone(), self.server.port)
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1".to_string(),
            port: DEFAULT_PORT,
        }
    }
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}
