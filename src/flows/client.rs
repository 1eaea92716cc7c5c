use super::{
    AdCopyVariationsInput, AdCopyVariationsOutput, AdResultsInput, AdResultsSummary, FlowKind,
    MechanismIdeasInput, MechanismIdeasOutput,
};
use crate::backend::{GeminiBackend, GenerativeBackend};
use crate::config::{BackendProvider, Config};
use crate::error::Result;
use crate::flow::{InvokeOptions, PreparedCall};
use serde_json::Value;
use std::sync::Arc;

/// A backend paired with the invocation options from configuration.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct FlowClient {
    backend: Arc<dyn GenerativeBackend>,
    options: InvokeOptions,
}

impl FlowClient {
    pub fn new(backend: Arc<dyn GenerativeBackend>, options: InvokeOptions) -> Self {
        Self { backend, options }
    }

    /// Build the configured backend. Fails if the API key is not set.
    pub fn from_config(config: &Config) -> Result<Self> {
        let backend: Arc<dyn GenerativeBackend> = match config.backend.provider {
            BackendProvider::Gemini => Arc::new(GeminiBackend::from_config(
                &config.backend,
                config.api_key()?,
            )?),
        };
        Ok(Self::new(backend, config.invoke_options()))
    }

    pub fn options(&self) -> &InvokeOptions {
        &self.options
    }

    pub async fn suggest_mechanism_ideas(
        &self,
        input: &MechanismIdeasInput,
    ) -> Result<MechanismIdeasOutput> {
        super::suggest_mechanism_ideas(self.backend.as_ref(), input, &self.options).await
    }

    pub async fn generate_ad_copy_variations(
        &self,
        input: &AdCopyVariationsInput,
    ) -> Result<AdCopyVariationsOutput> {
        super::generate_ad_copy_variations(self.backend.as_ref(), input, &self.options).await
    }

    pub async fn summarize_ad_results(&self, input: &AdResultsInput) -> Result<AdResultsSummary> {
        super::summarize_ad_results(self.backend.as_ref(), input, &self.options).await
    }

    /// Run a flow on an untyped JSON record.
    pub async fn run(&self, kind: FlowKind, input: &Value) -> Result<Value> {
        kind.definition()
            .invoke(self.backend.as_ref(), input, &self.options)
            .await
    }
}

/// Validate and render a flow's prompt without a backend.
pub fn prepare(kind: FlowKind, input: &Value, options: &InvokeOptions) -> Result<PreparedCall> {
    kind.definition().prepare(input, options)
}
