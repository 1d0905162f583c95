//! Error types for the CLI application.

use crate::config::ConfigError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Language model provider error
    #[error("LLM error: {0}")]
    Llm(#[from] hirelog_llm::LlmError),

    /// Classifier setup error
    #[error("Classifier error: {0}")]
    Extractor(#[from] hirelog_extractor::ExtractorError),

    /// Snapshot, CSV or store error
    #[error("Store error: {0}")]
    Store(#[from] hirelog_store::StoreError),

    /// gRPC server error
    #[error("Server error: {0}")]
    Server(#[from] hirelog_grpc::ServerError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
