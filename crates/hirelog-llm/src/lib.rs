//! Hirelog LLM Provider Layer
//!
//! Structured extraction through a language model's function-calling API.
//!
//! # Architecture
//!
//! The crate is split in two halves:
//!
//! - [`LlmProvider`]: the transport. It sends one tool-call request and hands
//!   back whatever tool calls the model produced.
//! - [`ExtractionClient`]: the policy. It owns the per-call deadline and turns
//!   the first tool call's arguments into a typed value.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OpenAiProvider`: OpenAI-compatible chat completions API
//!
//! # Examples
//!
//! ```
//! use hirelog_llm::{ExtractionClient, MockProvider, ToolSchema};
//! use serde::Deserialize;
//! use serde_json::json;
//! use std::sync::Arc;
//!
//! #[derive(Deserialize)]
//! struct Company {
//!     company_name: String,
//! }
//!
//! # #[tokio::main]
//! # async fn main() {
//! let provider = MockProvider::new(r#"{"company_name": "Stripe"}"#);
//! let client = ExtractionClient::new(Arc::new(provider));
//! let tool = ToolSchema::new("extract_company", "Find the company", json!({"type": "object"}));
//!
//! let company: Company = client
//!     .extract("system", "Thanks for applying to Stripe", &tool)
//!     .await
//!     .unwrap();
//! assert_eq!(company.company_name, "Stripe");
//! # }
//! ```

#![warn(missing_docs)]

pub mod extraction;
pub mod openai;
pub mod tool;

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use extraction::{parse_tool_arguments, ExtractionClient, DEFAULT_EXTRACTION_TIMEOUT};
pub use openai::OpenAiProvider;
pub use tool::{ToolCall, ToolRequest, ToolResponse, ToolSchema};

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// The call did not finish within the deadline
    #[error("LLM call timed out after {0:?}")]
    Timeout(Duration),

    /// The model answered but produced no usable tool call
    #[error("Extraction failed: {reason}")]
    ExtractionFailed {
        /// What was wrong with the answer
        reason: String,
        /// Raw response body, kept for diagnostics
        raw: String,
    },

    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider could not be configured
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Transport for a single tool-call request
///
/// Implementations make exactly one attempt. Deadlines are applied by the
/// caller ([`ExtractionClient`]), so a provider may be slow but must not retry
/// past the point where its future is dropped.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the request and return the tool calls the model made
    async fn invoke(&self, request: &ToolRequest) -> Result<ToolResponse, LlmError>;
}

#[derive(Debug, Clone)]
enum MockReply {
    Arguments(String),
    NoToolCall,
    Error,
}

/// Mock LLM provider for deterministic testing
///
/// Replies are keyed by `(tool name, user message)`. Anything not scripted
/// gets the default reply. The provider also records how often it was
/// called and how many calls overlapped, which is what concurrency tests
/// assert on.
///
/// # Examples
///
/// ```
/// use hirelog_llm::MockProvider;
///
/// let mut provider = MockProvider::default();
/// provider.add_response("extract_company", "Thanks for applying to Stripe", r#"{"company_name":"Stripe"}"#);
/// provider.add_error("extract_company", "boom");
/// assert_eq!(provider.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockProvider {
    default_reply: MockReply,
    responses: Arc<Mutex<HashMap<(String, String), MockReply>>>,
    calls: Arc<Mutex<Vec<(String, String)>>>,
    latency: Option<Duration>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockProvider {
    /// Create a new MockProvider that answers every request with `arguments`
    pub fn new(arguments: impl Into<String>) -> Self {
        Self::with_default(MockReply::Arguments(arguments.into()))
    }

    fn with_default(default_reply: MockReply) -> Self {
        Self {
            default_reply,
            responses: Arc::new(Mutex::new(HashMap::new())),
            calls: Arc::new(Mutex::new(Vec::new())),
            latency: None,
            in_flight: Arc::new(AtomicUsize::new(0)),
            max_in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Delay every reply by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Answer `(tool, user)` with a tool call carrying `arguments`
    pub fn add_response(
        &mut self,
        tool: impl Into<String>,
        user: impl Into<String>,
        arguments: impl Into<String>,
    ) {
        lock(&self.responses).insert((tool.into(), user.into()), MockReply::Arguments(arguments.into()));
    }

    /// Answer `(tool, user)` without any tool call
    pub fn add_no_tool_call(&mut self, tool: impl Into<String>, user: impl Into<String>) {
        lock(&self.responses).insert((tool.into(), user.into()), MockReply::NoToolCall);
    }

    /// Configure to return an error for `(tool, user)`
    pub fn add_error(&mut self, tool: impl Into<String>, user: impl Into<String>) {
        lock(&self.responses).insert((tool.into(), user.into()), MockReply::Error);
    }

    /// Get the number of times invoke was called
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Number of calls made with the given tool
    pub fn calls_for(&self, tool: &str) -> usize {
        lock(&self.calls).iter().filter(|(name, _)| name == tool).count()
    }

    /// Highest number of calls that were in progress at the same time
    pub fn max_in_flight(&self) -> usize {
        self.max_in_flight.load(Ordering::SeqCst)
    }

    /// Reset call bookkeeping
    pub fn reset_call_count(&self) {
        lock(&self.calls).clear();
        self.max_in_flight.store(0, Ordering::SeqCst);
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::with_default(MockReply::NoToolCall)
    }
}

// Decrements the in-flight counter even when the call future is dropped
// by a timeout.
struct InFlight<'a>(&'a AtomicUsize);

impl<'a> InFlight<'a> {
    fn enter(counter: &'a AtomicUsize, max: &AtomicUsize) -> Self {
        let now = counter.fetch_add(1, Ordering::SeqCst) + 1;
        max.fetch_max(now, Ordering::SeqCst);
        Self(counter)
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl LlmProvider for MockProvider {
    async fn invoke(&self, request: &ToolRequest) -> Result<ToolResponse, LlmError> {
        let key = (request.tool.name.clone(), request.user.clone());
        lock(&self.calls).push(key.clone());
        let _guard = InFlight::enter(&self.in_flight, &self.max_in_flight);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        let reply = lock(&self.responses)
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_reply.clone());

        match reply {
            MockReply::Arguments(arguments) => Ok(ToolResponse {
                raw: arguments.clone(),
                tool_calls: vec![ToolCall {
                    name: request.tool.name.clone(),
                    arguments,
                }],
            }),
            MockReply::NoToolCall => Ok(ToolResponse {
                tool_calls: Vec::new(),
                raw: String::new(),
            }),
            MockReply::Error => Err(LlmError::Communication("Mock error".to_string())),
        }
    }
}
