use crate::backend::{BackendError, GenerationRequest, GenerativeBackend};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Mutex;

/// What a [`StubBackend`] answers with.
pub(crate) enum Reply {
    /// The same value for every request.
    Fixed(Value),
    /// No structured output.
    Nothing,
    /// A transport failure.
    Fail,
    /// Calls the closure with the rendered prompt.
    Echo(fn(&str) -> Value),
}

/// In-memory backend that records every request it receives.
pub(crate) struct StubBackend {
    reply: Reply,
    calls: Mutex<Vec<GenerationRequest>>,
}

impl StubBackend {
    pub(crate) fn new(reply: Reply) -> Self {
        Self {
            reply,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub(crate) fn returning(value: Value) -> Self {
        Self::new(Reply::Fixed(value))
    }

    pub(crate) fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub(crate) fn requests(&self) -> Vec<GenerationRequest> {
        self.calls.lock().unwrap().clone()
    }

    pub(crate) fn last_prompt(&self) -> String {
        self.calls
            .lock()
            .unwrap()
            .last()
            .map(|r| r.prompt.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    async fn submit(&self, request: &GenerationRequest) -> Result<Option<Value>, BackendError> {
        self.calls.lock().unwrap().push(request.clone());
        // Yield so concurrent invocations interleave.
        tokio::task::yield_now().await;
        match &self.reply {
            Reply::Fixed(value) => Ok(Some(value.clone())),
            Reply::Nothing => Ok(None),
            Reply::Fail => Err(BackendError::Unavailable("stub backend offline".to_string())),
            Reply::Echo(f) => Ok(Some(f(&request.prompt))),
        }
    }
}
