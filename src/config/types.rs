//! Configuration types and defaults for stratlify.
//!
//! This module defines the config sections, enums, and default value
//! functions used by the Config struct.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Which generative service backs the flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BackendProvider {
    /// Google Gemini `generateContent` REST API.
    #[default]
    Gemini,
}

// Default value functions for serde
pub(crate) fn default_model() -> String {
    "gemini-2.0-flash".to_string()
}
pub(crate) fn default_api_base() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}
pub(crate) fn default_api_key_env() -> String {
    "GEMINI_API_KEY".to_string()
}
pub(crate) fn default_timeout_seconds() -> u64 {
    60
}
pub(crate) fn default_max_variations() -> u32 {
    10
}
pub(crate) fn default_max_input_chars() -> usize {
    20_000
}

/// Connection settings for the generative backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Backend service (only `gemini` today).
    pub provider: BackendProvider,

    /// Model identifier passed in the request path.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the API, without the `/models/...` suffix.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,

    /// HTTP request timeout in seconds.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// Sampling temperature; backend default when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            provider: BackendProvider::default(),
            model: default_model(),
            api_base: default_api_base(),
            api_key_env: default_api_key_env(),
            timeout_seconds: default_timeout_seconds(),
            temperature: None,
            extra: BTreeMap::new(),
        }
    }
}

/// Bounds on what callers may send to the backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Largest accepted `numberOfVariations`.
    #[serde(default = "default_max_variations")]
    pub max_variations: u32,

    /// Longest accepted text field, in characters.
    #[serde(default = "default_max_input_chars")]
    pub max_input_chars: usize,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_variations: default_max_variations(),
            max_input_chars: default_max_input_chars(),
            extra: BTreeMap::new(),
        }
    }
}
