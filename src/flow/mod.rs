//! PromptFlow engine.
//!
//! A flow is a named text-generation operation with an input shape, an
//! output shape, a prompt template and optional safety settings. It is
//! defined once with [`FlowDefinition`] and invoked any number of times:
//!
//! 1. validate input and apply defaults
//! 2. render the template
//! 3. make one backend call
//! 4. validate the response against the output shape

mod definition;
mod options;
mod typed;


pub use definition::{FlowDefinition, InputCheck, PreparedCall, PromptFlow};
pub use options::{InputLimits, InvokeOptions};
pub use typed::Flow;
