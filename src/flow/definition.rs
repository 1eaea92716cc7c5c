//! Flow definitions and the JSON-level invocation engine.

use super::options::{InputLimits, InvokeOptions};
use crate::backend::{GenerationRequest, GenerativeBackend};
use crate::error::{Result, StratlifyError};
use crate::prompt::{placeholders, render_template, template_vars};
use crate::safety::{HarmBlockThreshold, HarmCategory, SafetySetting, duplicate_category};
use crate::schema::{Shape, format_violations};
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;
use tracing::Instrument;

/// Regex pattern for valid flow names.
static FLOW_NAME_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$").expect("Invalid flow name regex"));

/// Extra input check run after shape validation, before rendering.
///
/// Receives the input with defaults applied. Returns a message describing
/// the problem, which becomes a `ValidationError`.
pub type InputCheck = fn(&Value, &InputLimits) -> std::result::Result<(), String>;

/// Declarative description of a flow, assembled with builder methods and
/// checked once by [`FlowDefinition::build`].
///
/// ```
/// use stratlify::flow::FlowDefinition;
/// use stratlify::schema::{FieldSpec, FieldType, Shape};
///
/// let flow = FlowDefinition::new("tagline")
///     .input(Shape::new().field(FieldSpec::required("product", FieldType::String)))
///     .output(Shape::new().field(FieldSpec::required("tagline", FieldType::String)))
///     .template("Write a tagline for {product}.")
///     .build()
///     .unwrap();
/// assert_eq!(flow.name(), "tagline");
/// ```
#[derive(Debug, Clone)]
pub struct FlowDefinition {
    name: String,
    description: String,
    input_shape: Shape,
    output_shape: Shape,
    template: String,
    safety: Vec<SafetySetting>,
    checks: Vec<InputCheck>,
}

impl FlowDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            input_shape: Shape::new(),
            output_shape: Shape::new(),
            template: String::new(),
            safety: Vec::new(),
            checks: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn input(mut self, shape: Shape) -> Self {
        self.input_shape = shape;
        self
    }

    pub fn output(mut self, shape: Shape) -> Self {
        self.output_shape = shape;
        self
    }

    pub fn template(mut self, template: impl Into<String>) -> Self {
        self.template = template.into();
        self
    }

    /// Add a pass-through safety threshold for one harm category.
    pub fn safety(mut self, category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        self.safety.push(SafetySetting::new(category, threshold));
        self
    }

    pub fn check(mut self, check: InputCheck) -> Self {
        self.checks.push(check);
        self
    }

    /// Check the definition and turn it into an invocable flow.
    ///
    /// Rejects:
    /// - names that are not an ASCII letter followed by letters, digits, `_` or `-`
    /// - templates that fail to parse or are empty
    /// - placeholders that are not declared input fields, that name an
    ///   array/object field, or that may be absent at render time
    /// - output shapes with no fields
    /// - defaults that do not satisfy their own field type
    /// - a harm category listed twice
    pub fn build(self) -> Result<PromptFlow> {
        let fail = |msg: String| Err(StratlifyError::DefinitionError(msg));

        if !FLOW_NAME_REGEX.is_match(&self.name) {
            return fail(format!("invalid flow name '{}'", self.name));
        }

        if self.template.trim().is_empty() {
            return fail(format!("flow '{}' has an empty template", self.name));
        }

        if self.output_shape.fields().is_empty() {
            return fail(format!("flow '{}' declares no output fields", self.name));
        }

        for placeholder in placeholders(&self.template)? {
            match self.input_shape.get(&placeholder.name) {
                None => {
                    return fail(format!(
                        "flow '{}' template references '{}', which is not an input field",
                        self.name, placeholder.name
                    ));
                }
                Some(field) if !field.field_type.is_scalar() => {
                    return fail(format!(
                        "flow '{}' template references '{}', which is a {} field",
                        self.name,
                        placeholder.name,
                        field.field_type.type_name()
                    ));
                }
                Some(field) if !field.required && field.default.is_none() => {
                    return fail(format!(
                        "flow '{}' template references '{}', which is optional with no default",
                        self.name, placeholder.name
                    ));
                }
                Some(_) => {}
            }
        }

        // Defaults must survive validation, otherwise every call omitting the
        // field would be rejected.
        let defaults_only = Shape::new();
        let defaults_only = self
            .input_shape
            .fields()
            .iter()
            .filter(|f| f.default.is_some())
            .fold(defaults_only, |shape, f| shape.field(f.clone()));
        if let Err(violations) = defaults_only.validate(&Value::Object(Default::default())) {
            return fail(format!(
                "flow '{}' has invalid defaults: {}",
                self.name,
                format_violations(&violations)
            ));
        }

        if let Some(category) = duplicate_category(&self.safety) {
            return fail(format!(
                "flow '{}' lists safety category {:?} more than once",
                self.name, category
            ));
        }

        Ok(PromptFlow { def: self })
    }
}

/// A validated flow definition, ready to invoke.
///
/// Immutable after construction; one instance can serve any number of
/// concurrent invocations.
#[derive(Debug, Clone)]
pub struct PromptFlow {
    def: FlowDefinition,
}

/// Input validated and rendered, ready to submit.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedCall {
    /// Input record with defaults applied.
    pub input: Value,
    pub request: GenerationRequest,
}

impl PromptFlow {
    pub fn name(&self) -> &str {
        &self.def.name
    }

    pub fn description(&self) -> &str {
        &self.def.description
    }

    pub fn input_shape(&self) -> &Shape {
        &self.def.input_shape
    }

    pub fn output_shape(&self) -> &Shape {
        &self.def.output_shape
    }

    pub fn template(&self) -> &str {
        &self.def.template
    }

    /// Safety settings declared by the definition.
    pub fn safety(&self) -> &[SafetySetting] {
        &self.def.safety
    }

    /// Validate `input`, apply defaults, limits and input checks, and render
    /// the prompt.
    ///
    /// Never contacts the backend.
    pub fn prepare(&self, input: &Value, options: &InvokeOptions) -> Result<PreparedCall> {
        let input = self.def.input_shape.validate(input).map_err(|violations| {
            StratlifyError::ValidationError(format!(
                "{} input rejected: {}",
                self.name(),
                format_violations(&violations)
            ))
        })?;

        self.check_text_limits(&input, options.limits.max_input_chars)?;
        for check in &self.def.checks {
            check(&input, &options.limits).map_err(|msg| {
                StratlifyError::ValidationError(format!("{} input rejected: {}", self.name(), msg))
            })?;
        }

        let prompt = render_template(&self.def.template, &template_vars(&input))?;

        let safety = options
            .safety_overrides
            .get(self.name())
            .cloned()
            .unwrap_or_else(|| self.def.safety.clone());

        Ok(PreparedCall {
            input,
            request: GenerationRequest {
                flow: self.def.name.clone(),
                prompt,
                output_schema: self.def.output_shape.to_json_schema(),
                safety,
            },
        })
    }

    fn check_text_limits(&self, input: &Value, max_chars: usize) -> Result<()> {
        let Some(fields) = input.as_object() else {
            return Ok(());
        };
        for (name, value) in fields {
            if let Some(text) = value.as_str() {
                let len = text.chars().count();
                if len > max_chars {
                    return Err(StratlifyError::ValidationError(format!(
                        "{} input rejected: {} is {} characters, limit is {}",
                        self.name(),
                        name,
                        len,
                        max_chars
                    )));
                }
            }
        }
        Ok(())
    }

    /// Run the flow: validate, render, make exactly one backend call, and
    /// validate the response against the output shape.
    ///
    /// # Errors
    ///
    /// * `ValidationError` - input rejected; the backend was not contacted
    /// * `BackendError` - the backend call failed at the transport level
    /// * `GenerationError` - the backend returned nothing, or output that
    ///   does not match the output shape
    pub async fn invoke(
        &self,
        backend: &dyn GenerativeBackend,
        input: &Value,
        options: &InvokeOptions,
    ) -> Result<Value> {
        let span = tracing::info_span!("flow", name = %self.name());
        async move {
            let prepared = self.prepare(input, options)?;
            tracing::debug!(
                prompt_chars = prepared.request.prompt.len(),
                safety_settings = prepared.request.safety.len(),
                "submitting generation request"
            );

            let raw = match backend.submit(&prepared.request).await? {
                Some(Value::Null) | None => {
                    tracing::warn!("backend returned no structured output");
                    return Err(StratlifyError::GenerationError(format!(
                        "{} returned no structured output",
                        self.name()
                    )));
                }
                Some(raw) => raw,
            };

            let output = self.def.output_shape.validate(&raw).map_err(|violations| {
                tracing::warn!(violations = violations.len(), "output does not match shape");
                StratlifyError::GenerationError(format!(
                    "{} output does not match its shape: {}",
                    self.name(),
                    format_violations(&violations)
                ))
            })?;

            tracing::info!("flow completed");
            Ok(output)
        }
        .instrument(span)
        .await
    }
}
