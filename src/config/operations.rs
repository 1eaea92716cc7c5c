//! Config loading, validation, and utility operations.

use super::model::Config;
use crate::error::{StratlifyError, Result};
use crate::flow::{InputLimits, InvokeOptions};
use crate::flows::FlowKind;
use crate::safety::duplicate_category;
use std::path::Path;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(StratlifyError::UserError)` - Read error, parse error or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            StratlifyError::UserError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from a YAML file, or fall back to defaults when the file
    /// does not exist. A file that exists but is invalid is still an error.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        // An empty document deserializes as unit, not as an empty mapping.
        let config: Config = if yaml.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| {
                StratlifyError::UserError(format!("failed to parse config YAML: {}", e))
            })?
        };

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            StratlifyError::UserError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values and return error on invalid values.
    ///
    /// Validation rules:
    /// - `backend.model` and `backend.api_key_env` must be non-empty
    /// - `backend.api_base` must be an http(s) URL
    /// - `backend.timeout_seconds`, `limits.max_variations` and
    ///   `limits.max_input_chars` must be positive
    /// - `backend.temperature`, when set, must be within 0.0..=2.0
    /// - `safety_overrides` keys must name a known flow, with each harm
    ///   category listed at most once
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: String| {
            Err(StratlifyError::UserError(format!(
                "config validation failed: {}",
                msg
            )))
        };

        if self.backend.model.trim().is_empty() {
            return fail("backend.model must not be empty".to_string());
        }

        if !(self.backend.api_base.starts_with("http://")
            || self.backend.api_base.starts_with("https://"))
        {
            return fail(format!(
                "backend.api_base must start with http:// or https:// (found '{}')",
                self.backend.api_base
            ));
        }

        if self.backend.api_key_env.trim().is_empty() {
            return fail("backend.api_key_env must not be empty".to_string());
        }

        if self.backend.timeout_seconds == 0 {
            return fail("backend.timeout_seconds must be greater than 0".to_string());
        }

        if let Some(t) = self.backend.temperature
            && !(0.0..=2.0).contains(&t)
        {
            return fail(format!(
                "backend.temperature must be between 0.0 and 2.0 (found {})",
                t
            ));
        }

        if self.limits.max_variations == 0 {
            return fail("limits.max_variations must be greater than 0".to_string());
        }

        if self.limits.max_input_chars == 0 {
            return fail("limits.max_input_chars must be greater than 0".to_string());
        }

        for (flow, settings) in &self.safety_overrides {
            if !FlowKind::all().iter().any(|k| k.name() == flow.as_str()) {
                return fail(format!(
                    "safety_overrides references unknown flow '{}'. Known flows: {}",
                    flow,
                    FlowKind::all()
                        .iter()
                        .map(|k| k.name())
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
            }
            if let Some(category) = duplicate_category(settings) {
                return fail(format!(
                    "safety_overrides.{} lists category {:?} more than once",
                    flow, category
                ));
            }
        }

        Ok(())
    }

    /// Read the backend API key from the environment variable named by
    /// `backend.api_key_env`.
    pub fn api_key(&self) -> Result<String> {
        let var = &self.backend.api_key_env;
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(StratlifyError::UserError(format!(
                "API key not found: set the {} environment variable \
                 (or point backend.api_key_env at another variable)",
                var
            ))),
        }
    }

    /// Per-call options derived from the limits and safety overrides.
    pub fn invoke_options(&self) -> InvokeOptions {
        InvokeOptions {
            limits: InputLimits {
                max_input_chars: self.limits.max_input_chars,
                max_variations: self.limits.max_variations,
            },
            safety_overrides: self.safety_overrides.clone(),
        }
    }
}
