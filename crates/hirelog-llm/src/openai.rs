//! OpenAI Provider Implementation
//!
//! Talks to any server implementing the OpenAI chat completions API with
//! function tools (`POST {base_url}/v1/chat/completions`).
//!
//! # Examples
//!
//! ```no_run
//! use hirelog_llm::OpenAiProvider;
//!
//! let provider = OpenAiProvider::new("https://api.openai.com", "gpt-4o-mini", "sk-...").unwrap();
//! ```

use crate::{LlmError, LlmProvider, ToolCall, ToolRequest, ToolResponse};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// Default API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Default model
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Connection establishment timeout
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// OpenAI-compatible tool-calling provider
///
/// One HTTP request per [`LlmProvider::invoke`]; failures are not retried.
pub struct OpenAiProvider {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    tools: Vec<Value>,
    tool_choice: Value,
    temperature: f32,
}

#[derive(Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: AssistantMessage,
}

#[derive(Deserialize)]
struct AssistantMessage {
    #[serde(default)]
    tool_calls: Option<Vec<RawToolCall>>,
}

#[derive(Deserialize)]
struct RawToolCall {
    function: FunctionCall,
}

#[derive(Deserialize)]
struct FunctionCall {
    name: String,
    arguments: String,
}

impl OpenAiProvider {
    /// Create a new provider
    ///
    /// # Parameters
    ///
    /// - `base_url`: API root without the `/v1` suffix
    /// - `model`: Model to use (e.g., "gpt-4o-mini")
    /// - `api_key`: Bearer token
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS))
            .build()
            .map_err(|e| LlmError::Config(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
            api_key: api_key.into(),
            client,
        })
    }

    /// Create a provider reading the API key from the environment variable `key_var`
    pub fn from_env(
        base_url: impl Into<String>,
        model: impl Into<String>,
        key_var: &str,
    ) -> Result<Self, LlmError> {
        let api_key = std::env::var(key_var)
            .map_err(|_| LlmError::Config(format!("environment variable {} is not set", key_var)))?;
        Self::new(base_url, model, api_key)
    }

    /// Model name
    pub fn model(&self) -> &str {
        &self.model
    }

    fn parse_response(body: &str) -> Result<ToolResponse, LlmError> {
        let parsed: ChatCompletionResponse = serde_json::from_str(body)
            .map_err(|e| LlmError::InvalidResponse(format!("Failed to parse response: {}", e)))?;

        let tool_calls = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.tool_calls)
            .unwrap_or_default()
            .into_iter()
            .map(|call| ToolCall {
                name: call.function.name,
                arguments: call.function.arguments,
            })
            .collect();

        Ok(ToolResponse {
            tool_calls,
            raw: body.to_string(),
        })
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn invoke(&self, request: &ToolRequest) -> Result<ToolResponse, LlmError> {
        let url = format!("{}/v1/chat/completions", self.base_url);

        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: &request.system,
                },
                ChatMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            tools: vec![request.tool.to_function_tool()],
            tool_choice: request.tool.to_tool_choice(),
            temperature: 0.0,
        };

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Communication(format!("Request failed: {}", e)))?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LlmError::ModelNotAvailable(self.model.clone()));
        }
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(LlmError::RateLimitExceeded);
        }

        let text = response
            .text()
            .await
            .map_err(|e| LlmError::Communication(format!("Failed to read response: {}", e)))?;

        if !status.is_success() {
            return Err(LlmError::Communication(format!("HTTP {}: {}", status, text)));
        }

        debug!(tool = %request.tool.name, model = %self.model, "Chat completion received");
        Self::parse_response(&text)
    }
}
