//! Generative backend seam.
//!
//! A flow renders its prompt and hands a [`GenerationRequest`] to a
//! [`GenerativeBackend`]. The backend owns the protocol: model invocation,
//! schema-constrained output, safety filtering. It answers with the parsed
//! structured value, or `None` when it produced nothing usable.
//!
//! - **gemini**: HTTP client for the Gemini `generateContent` endpoint

mod gemini;

pub use gemini::GeminiBackend;

use crate::safety::SafetySetting;
use async_trait::async_trait;
use serde_json::Value;

/// Everything a backend needs for one generation call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    /// Name of the flow issuing the call (for backend-side tracing).
    pub flow: String,
    /// Fully rendered prompt text.
    pub prompt: String,
    /// Schema directive the output must conform to.
    pub output_schema: Value,
    /// Harm category thresholds, passed through untouched.
    pub safety: Vec<SafetySetting>,
}

/// Errors from the backend transport layer.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The backend could not be used at all (misconfiguration, unreachable).
    #[error("{0}")]
    Unavailable(String),
}

/// A service that turns a prompt plus output schema into structured output.
///
/// Implementations must be shareable across concurrent invocations.
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    /// Submit one generation request.
    ///
    /// Returns `Ok(None)` when the call succeeded but yielded no structured
    /// output (empty candidates, blocked prompt, unparseable text).
    async fn submit(&self, request: &GenerationRequest) -> Result<Option<Value>, BackendError>;
}
