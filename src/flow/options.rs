//! Per-call options shared by every flow invocation.

use crate::config::types::{default_max_input_chars, default_max_variations};
use crate::safety::SafetySetting;
use std::collections::BTreeMap;

/// Upper bounds checked before any backend call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputLimits {
    /// Longest accepted text field, in characters.
    pub max_input_chars: usize,
    /// Largest accepted requested variation count.
    pub max_variations: u32,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            max_input_chars: default_max_input_chars(),
            max_variations: default_max_variations(),
        }
    }
}

/// Options applied to an invocation on top of the flow definition.
#[derive(Debug, Clone, Default)]
pub struct InvokeOptions {
    pub limits: InputLimits,
    /// Replacement safety settings keyed by flow name.
    pub safety_overrides: BTreeMap<String, Vec<SafetySetting>>,
}
