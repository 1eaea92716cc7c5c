//! Typed wrapper over [`PromptFlow`].

use super::definition::PromptFlow;
use super::options::InvokeOptions;
use crate::backend::GenerativeBackend;
use crate::error::{Result, StratlifyError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;

/// A [`PromptFlow`] whose input and output are Rust types.
///
/// Input is serialized to JSON before validation; the validated output is
/// deserialized into `O`.
#[derive(Debug)]
pub struct Flow<I, O> {
    inner: PromptFlow,
    _types: PhantomData<fn(&I) -> O>,
}

impl<I, O> Flow<I, O>
where
    I: Serialize,
    O: DeserializeOwned,
{
    pub fn new(inner: PromptFlow) -> Self {
        Self {
            inner,
            _types: PhantomData,
        }
    }

    pub fn prompt_flow(&self) -> &PromptFlow {
        &self.inner
    }

    pub fn name(&self) -> &str {
        self.inner.name()
    }

    pub async fn invoke(
        &self,
        backend: &dyn GenerativeBackend,
        input: &I,
        options: &InvokeOptions,
    ) -> Result<O> {
        let input = serde_json::to_value(input).map_err(|e| {
            StratlifyError::ValidationError(format!(
                "{} input could not be serialized: {}",
                self.name(),
                e
            ))
        })?;

        let output = self.inner.invoke(backend, &input, options).await?;

        serde_json::from_value(output).map_err(|e| {
            StratlifyError::GenerationError(format!(
                "{} output could not be decoded: {}",
                self.name(),
                e
            ))
        })
    }
}
