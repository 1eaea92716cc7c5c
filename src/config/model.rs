//! Config struct definition.

use super::types::*;
use crate::safety::SafetySetting;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Configuration for stratlify.
///
/// This struct represents the contents of `stratlify.yaml`.
/// Unknown fields in the YAML are preserved for forward compatibility.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Generative backend connection settings.
    pub backend: BackendConfig,

    /// Input bounds enforced before any backend call.
    pub limits: LimitsConfig,

    /// Per-flow replacement of the built-in safety settings, keyed by flow name
    /// (e.g. `generateAdCopyVariations`). An empty list disables them.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub safety_overrides: BTreeMap<String, Vec<SafetySetting>>,

    /// Unknown fields preserved for forward compatibility.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_yaml::Value>,
}
