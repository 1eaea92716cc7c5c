//! HTTP client for the Gemini `models/{model}:generateContent` endpoint.
//!
//! The prompt goes out as a single user part. Structured output is
//! requested with `responseMimeType: application/json` plus a
//! `responseSchema` converted from the flow's output shape.

use super::{BackendError, GenerationRequest, GenerativeBackend};
use crate::config::BackendConfig;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Map, Value, json};
use std::time::Duration;

/// Gemini REST client.
pub struct GeminiBackend {
    client: reqwest::Client,
    api_base: String,
    model: String,
    api_key: String,
    temperature: Option<f32>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<Content>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    block_reason: Option<String>,
}

impl GeminiBackend {
    /// Build a client from the `backend` config section.
    ///
    /// The HTTP client carries the configured request timeout.
    pub fn from_config(config: &BackendConfig, api_key: String) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            model: config.model.clone(),
            api_key,
            temperature: config.temperature,
        })
    }

    /// Full URL of the generateContent call for the configured model.
    pub fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_base.trim_end_matches('/'),
            self.model
        )
    }

    fn request_body(&self, request: &GenerationRequest) -> Value {
        let mut generation_config = json!({
            "responseMimeType": "application/json",
            "responseSchema": to_gemini_schema(&request.output_schema),
        });
        if let (Some(t), Some(obj)) = (self.temperature, generation_config.as_object_mut()) {
            obj.insert("temperature".to_string(), json!(t));
        }

        let mut body = json!({
            "contents": [{
                "role": "user",
                "parts": [{ "text": request.prompt }],
            }],
            "generationConfig": generation_config,
        });

        if !request.safety.is_empty()
            && let Some(obj) = body.as_object_mut()
        {
            let settings: Vec<Value> = request
                .safety
                .iter()
                .map(|s| {
                    json!({
                        "category": s.category.api_name(),
                        "threshold": s.threshold.api_name(),
                    })
                })
                .collect();
            obj.insert("safetySettings".to_string(), Value::Array(settings));
        }

        body
    }

    /// Ensure the response has a success status code, or turn it into
    /// [`BackendError::Api`] carrying the body text.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(BackendError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl GenerativeBackend for GeminiBackend {
    async fn submit(&self, request: &GenerationRequest) -> Result<Option<Value>, BackendError> {
        tracing::debug!(flow = %request.flow, model = %self.model, "calling generateContent");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&self.request_body(request))
            .send()
            .await?;

        let response = Self::ensure_success(response).await?;
        let parsed: GenerateContentResponse = response.json().await?;
        Ok(extract_output(parsed, &request.flow))
    }
}

/// Pull the structured value out of a generateContent response.
fn extract_output(response: GenerateContentResponse, flow: &str) -> Option<Value> {
    if let Some(reason) = response.prompt_feedback.and_then(|f| f.block_reason) {
        tracing::warn!(flow, reason = %reason, "prompt blocked by backend");
        return None;
    }

    let candidate = response.candidates.into_iter().next()?;
    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        tracing::warn!(flow, "candidate blocked by safety settings");
        return None;
    }

    let text: String = candidate
        .content?
        .parts
        .into_iter()
        .filter_map(|p| p.text)
        .collect();

    let json_text = strip_code_fence(&text);
    if json_text.is_empty() {
        return None;
    }

    match serde_json::from_str(json_text) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(flow, error = %e, "backend text is not valid JSON");
            None
        }
    }
}

/// Strip a surrounding markdown code fence (```json or ```), if present.
fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

/// Convert a JSON-schema-like directive into Gemini's schema dialect.
///
/// Gemini spells types in upper case (`STRING`, `ARRAY`, ...). Keys other
/// than `type`, `properties`, `items`, `required` and `description` are
/// dropped.
fn to_gemini_schema(schema: &Value) -> Value {
    let Some(obj) = schema.as_object() else {
        return schema.clone();
    };

    let mut out = Map::new();
    for (key, value) in obj {
        let converted = match key.as_str() {
            "type" => match value.as_str() {
                Some(t) => json!(t.to_ascii_uppercase()),
                None => value.clone(),
            },
            "properties" => match value.as_object() {
                Some(props) => Value::Object(
                    props
                        .iter()
                        .map(|(name, prop)| (name.clone(), to_gemini_schema(prop)))
                        .collect(),
                ),
                None => value.clone(),
            },
            "items" => to_gemini_schema(value),
            "required" | "description" => value.clone(),
            _ => continue,
        };
        out.insert(key.clone(), converted);
    }
    Value::Object(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::safety::{HarmBlockThreshold, HarmCategory, SafetySetting};

    fn make_backend(temperature: Option<f32>) -> GeminiBackend {
        let config = BackendConfig {
            api_base: "https://example.test/v1beta/".to_string(),
            model: "gemini-2.0-flash".to_string(),
            temperature,
            ..Default::default()
        };
        GeminiBackend::from_config(&config, "test-key".to_string()).unwrap()
    }

    fn make_request(safety: Vec<SafetySetting>) -> GenerationRequest {
        GenerationRequest {
            flow: "summarizeAdResults".to_string(),
            prompt: "Summarize this".to_string(),
            output_schema: json!({
                "type": "object",
                "properties": {
                    "summary": {"type": "string", "description": "Summary"},
                    "tags": {"type": "array", "items": {"type": "string"}},
                },
                "required": ["summary"],
            }),
            safety,
        }
    }

    fn response(body: Value) -> GenerateContentResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let backend = make_backend(None);
        assert_eq!(
            backend.endpoint(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_request_body_without_safety() {
        let body = make_backend(None).request_body(&make_request(vec![]));

        assert_eq!(body["contents"][0]["role"], "user");
        assert_eq!(body["contents"][0]["parts"][0]["text"], "Summarize this");
        assert_eq!(
            body["generationConfig"]["responseMimeType"],
            "application/json"
        );
        assert_eq!(
            body["generationConfig"]["responseSchema"]["type"],
            "OBJECT"
        );
        assert!(body.get("safetySettings").is_none());
        assert!(body["generationConfig"].get("temperature").is_none());
    }

    #[test]
    fn test_request_body_with_safety_and_temperature() {
        let request = make_request(vec![
            SafetySetting::new(
                HarmCategory::DangerousContent,
                HarmBlockThreshold::BlockOnlyHigh,
            ),
            SafetySetting::new(
                HarmCategory::SexuallyExplicit,
                HarmBlockThreshold::BlockLowAndAbove,
            ),
        ]);
        let body = make_backend(Some(0.5)).request_body(&request);

        assert_eq!(
            body["safetySettings"],
            json!([
                {"category": "HARM_CATEGORY_DANGEROUS_CONTENT", "threshold": "BLOCK_ONLY_HIGH"},
                {"category": "HARM_CATEGORY_SEXUALLY_EXPLICIT", "threshold": "BLOCK_LOW_AND_ABOVE"},
            ])
        );
        assert_eq!(body["generationConfig"]["temperature"], json!(0.5));
    }

    #[test]
    fn test_schema_conversion() {
        let converted = to_gemini_schema(&make_request(vec![]).output_schema);
        assert_eq!(
            converted,
            json!({
                "type": "OBJECT",
                "properties": {
                    "summary": {"type": "STRING", "description": "Summary"},
                    "tags": {"type": "ARRAY", "items": {"type": "STRING"}},
                },
                "required": ["summary"],
            })
        );
    }

    #[test]
    fn test_schema_conversion_drops_unknown_keys() {
        let converted = to_gemini_schema(&json!({"type": "string", "$schema": "x"}));
        assert_eq!(converted, json!({"type": "STRING"}));
    }

    #[test]
    fn test_extract_output_joins_parts() {
        let parsed = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "{\"summary\": "}, {"text": "\"ok\"}"}]},
                "finishReason": "STOP",
            }]
        }));
        assert_eq!(
            extract_output(parsed, "f"),
            Some(json!({"summary": "ok"}))
        );
    }

    #[test]
    fn test_extract_output_strips_code_fence() {
        let parsed = response(json!({
            "candidates": [{
                "content": {"parts": [{"text": "```json\n{\"summary\": \"ok\"}\n```"}]},
            }]
        }));
        assert_eq!(
            extract_output(parsed, "f"),
            Some(json!({"summary": "ok"}))
        );
    }

    #[test]
    fn test_extract_output_no_candidates() {
        assert_eq!(extract_output(response(json!({})), "f"), None);
    }

    #[test]
    fn test_extract_output_blocked_prompt() {
        let parsed = response(json!({
            "candidates": [],
            "promptFeedback": {"blockReason": "SAFETY"},
        }));
        assert_eq!(extract_output(parsed, "f"), None);
    }

    #[test]
    fn test_extract_output_safety_finish() {
        let parsed = response(json!({
            "candidates": [{"finishReason": "SAFETY"}],
        }));
        assert_eq!(extract_output(parsed, "f"), None);
    }

    #[test]
    fn test_extract_output_invalid_json() {
        let parsed = response(json!({
            "candidates": [{"content": {"parts": [{"text": "Sure! Here are some ideas"}]}}],
        }));
        assert_eq!(extract_output(parsed, "f"), None);
    }

    #[test]
    fn test_extract_output_empty_text() {
        let parsed = response(json!({
            "candidates": [{"content": {"parts": [{"text": "   "}]}}],
        }));
        assert_eq!(extract_output(parsed, "f"), None);
    }

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("  {\"a\":1} "), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n[1]\n```"), "[1]");
        assert_eq!(strip_code_fence("```json\n{}\n```"), "{}");
    }
}
