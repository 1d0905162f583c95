//! Error types for the classifier

use crate::prompt::MessageKind;
use hirelog_llm::LlmError;
use thiserror::Error;

/// Errors that can occur while classifying a single email
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// LLM provider or extraction error
    #[error("LLM error: {0}")]
    Llm(#[from] LlmError),

    /// A company extraction was requested for a message kind that has no
    /// company instruction
    #[error("Invalid message type for company extraction: {0}")]
    InvalidMessageType(MessageKind),

    /// A concurrency slot could not be acquired
    #[error("Admission failed: {0}")]
    Admission(String),

    /// The task classifying this email did not complete
    #[error("Worker failed: {0}")]
    Worker(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

/// A per-email failure, attributed to its position in the batch
#[derive(Error, Debug)]
#[error("email {index} ({subject:?}): {source}")]
pub struct ClassificationError {
    /// Index of the email in the batch
    pub index: usize,

    /// Subject of the email, for display
    pub subject: String,

    /// What went wrong
    #[source]
    pub source: ExtractorError,
}
