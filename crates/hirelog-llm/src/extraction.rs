//! Extraction client: deadline and parsing policy on top of a provider

use crate::{LlmError, LlmProvider, ToolRequest, ToolResponse, ToolSchema};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Per-call deadline used unless configured otherwise
pub const DEFAULT_EXTRACTION_TIMEOUT: Duration = Duration::from_secs(15);

/// Turns (instruction, text, tool) into a typed value
///
/// Every call gets its own deadline. There is no retry: a timeout or an
/// answer without a tool call is reported to the caller as-is.
#[derive(Clone)]
pub struct ExtractionClient {
    provider: Arc<dyn LlmProvider>,
    timeout: Duration,
}

impl ExtractionClient {
    /// Create a client with the default 15 second deadline
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            timeout: DEFAULT_EXTRACTION_TIMEOUT,
        }
    }

    /// Override the per-call deadline
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Per-call deadline
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Ask the model to call `tool` on `user` and decode the arguments
    ///
    /// # Errors
    ///
    /// - [`LlmError::Timeout`] if the provider does not answer in time
    /// - [`LlmError::ExtractionFailed`] if the answer has no tool call or the
    ///   arguments do not decode into `T`
    /// - any transport error the provider reports
    pub async fn extract<T>(&self, system: &str, user: &str, tool: &ToolSchema) -> Result<T, LlmError>
    where
        T: DeserializeOwned,
    {
        let request = ToolRequest::new(system, user, tool.clone());

        let response = tokio::time::timeout(self.timeout, self.provider.invoke(&request))
            .await
            .map_err(|_| LlmError::Timeout(self.timeout))??;

        debug!(tool = %tool.name, calls = response.tool_calls.len(), "Extraction response received");
        parse_tool_arguments(&response)
    }
}

impl std::fmt::Debug for ExtractionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionClient")
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Decode the first tool call's arguments
pub fn parse_tool_arguments<T>(response: &ToolResponse) -> Result<T, LlmError>
where
    T: DeserializeOwned,
{
    let call = response
        .tool_calls
        .first()
        .ok_or_else(|| LlmError::ExtractionFailed {
            reason: "no tool call in response".to_string(),
            raw: response.raw.clone(),
        })?;

    serde_json::from_str(&call.arguments).map_err(|e| LlmError::ExtractionFailed {
        reason: format!("malformed tool arguments: {}", e),
        raw: response.raw.clone(),
    })
}
