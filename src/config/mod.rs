//! Configuration model for stratlify.
//!
//! This module defines the Config struct that represents `stratlify.yaml`.
//! It supports forward-compatible YAML parsing (unknown fields are kept),
//! sensible defaults for every field, and validation of config values.

mod model;
mod operations;
pub mod types;


/// Default config file name, resolved against the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "stratlify.yaml";

// Re-export public API
pub use model::Config;
pub use types::{BackendConfig, BackendProvider, LimitsConfig};
