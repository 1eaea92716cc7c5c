//! Stratlify: typed prompt flows for advertising copywriters.
//!
//! A flow is a named text-generation operation: an input shape, an output
//! shape, a prompt template and optional safety settings. Invoking a flow
//! validates the input, renders the prompt, calls a generative backend
//! once and validates the structured response.
//!
//! - [`flow`]: the PromptFlow engine
//! - [`flows`]: `suggestMechanismIdeas`, `generateAdCopyVariations`,
//!   `summarizeAdResults`
//! - [`backend`]: the backend seam and the Gemini client
//! - [`config`]: `stratlify.yaml`

pub mod backend;
pub mod config;
pub mod error;
pub mod exit_codes;
pub mod flow;
pub mod flows;
pub mod prompt;
pub mod safety;
pub mod schema;

#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Result, StratlifyError};
