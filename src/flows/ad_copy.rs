//! `generateAdCopyVariations`: headline, body copy and call to action
//! variations for an ad concept.

use crate::backend::GenerativeBackend;
use crate::error::Result;
use crate::flow::{Flow, FlowDefinition, InputLimits, InvokeOptions};
use crate::safety::{HarmBlockThreshold, HarmCategory};
use crate::schema::{FieldSpec, FieldType, Shape};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::LazyLock;

pub const NAME: &str = "generateAdCopyVariations";

/// Variations requested when the caller does not say.
pub const DEFAULT_VARIATIONS: u32 = 3;

const TEMPLATE: &str = "\
You are an expert advertising copywriter. Write {numberOfVariations} distinct \
ad copy variations for the concept below. Each variation needs a headline, \
body copy, and a call to action. Speak to the target audience and evoke the \
desired emotion.

Ad concept: {adConcept}
Desired emotion: {desiredEmotion}
Target audience: {targetAudience}

Product description:
{productDescription:raw}
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopyVariationsInput {
    pub ad_concept: String,
    pub product_description: String,
    pub desired_emotion: String,
    pub target_audience: String,
    /// Defaults to [`DEFAULT_VARIATIONS`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_variations: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopyVariation {
    pub headline: String,
    pub body_copy: String,
    pub call_to_action: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdCopyVariationsOutput {
    pub variations: Vec<AdCopyVariation>,
}

fn text(name: &str, description: &str) -> FieldSpec {
    FieldSpec::required(name, FieldType::String)
        .non_empty()
        .describe(description)
}

/// `numberOfVariations` must be between 1 and the configured maximum.
fn check_variation_count(input: &Value, limits: &InputLimits) -> std::result::Result<(), String> {
    let requested = match input.get("numberOfVariations") {
        None => u64::from(DEFAULT_VARIATIONS),
        Some(value) => value.as_u64().ok_or_else(|| {
            format!(
                "numberOfVariations must be between 1 and {} (got {})",
                limits.max_variations, value
            )
        })?,
    };
    if requested < 1 || requested > u64::from(limits.max_variations) {
        return Err(format!(
            "numberOfVariations must be between 1 and {} (got {})",
            limits.max_variations, requested
        ));
    }
    Ok(())
}

pub(crate) fn definition() -> FlowDefinition {
    let variation = Shape::new()
        .field(text("headline", "Attention-grabbing headline"))
        .field(text("bodyCopy", "Main ad text"))
        .field(text("callToAction", "What the reader should do next"));

    FlowDefinition::new(NAME)
        .description("Generate ad copy variations for an ad concept")
        .input(
            Shape::new()
                .field(text("adConcept", "The core idea of the ad"))
                .field(text("productDescription", "What is being advertised"))
                .field(text("desiredEmotion", "Emotion the ad should evoke"))
                .field(text("targetAudience", "Who the ad is for"))
                .field(
                    FieldSpec::optional("numberOfVariations", FieldType::Integer)
                        .with_default(json!(DEFAULT_VARIATIONS))
                        .describe("How many variations to generate"),
                ),
        )
        .output(Shape::new().field(
            FieldSpec::required("variations", FieldType::array_of(FieldType::Object(variation)))
                .describe("The generated variations"),
        ))
        .template(TEMPLATE)
        .check(check_variation_count)
        .safety(
            HarmCategory::DangerousContent,
            HarmBlockThreshold::BlockOnlyHigh,
        )
        .safety(
            HarmCategory::Harassment,
            HarmBlockThreshold::BlockMediumAndAbove,
        )
        .safety(
            HarmCategory::SexuallyExplicit,
            HarmBlockThreshold::BlockLowAndAbove,
        )
}

pub(crate) static FLOW: LazyLock<Flow<AdCopyVariationsInput, AdCopyVariationsOutput>> =
    LazyLock::new(|| {
        Flow::new(
            definition()
                .build()
                .expect("Invalid generateAdCopyVariations definition"),
        )
    });

/// Generate ad copy variations for an ad concept.
///
/// The model is asked for `numberOfVariations` entries but the count it
/// returns is not enforced.
pub async fn generate_ad_copy_variations(
    backend: &dyn GenerativeBackend,
    input: &AdCopyVariationsInput,
    options: &InvokeOptions,
) -> Result<AdCopyVariationsOutput> {
    let output = FLOW.invoke(backend, input, options).await?;

    let requested = input.number_of_variations.unwrap_or(DEFAULT_VARIATIONS) as usize;
    if output.variations.len() != requested {
        tracing::debug!(
            requested,
            returned = output.variations.len(),
            "variation count differs from request"
        );
    }

    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StratlifyError;
    use crate::test_support::{Reply, StubBackend};

    fn input() -> AdCopyVariationsInput {
        AdCopyVariationsInput {
            ad_concept: "Summer Glow".to_string(),
            product_description: "Lightweight SPF 50 moisturizer".to_string(),
            desired_emotion: "confidence".to_string(),
            target_audience: "Women 25-40 who spend time outdoors".to_string(),
            number_of_variations: None,
        }
    }

    fn two_variations() -> Value {
        json!({
            "variations": [
                {"headline": "Glow all summer", "bodyCopy": "SPF 50 that feels like nothing.", "callToAction": "Shop now"},
                {"headline": "Sun-ready skin", "bodyCopy": "Protection without the grease.", "callToAction": "Try it today"}
            ]
        })
    }

    #[test]
    fn definition_builds_with_safety_defaults() {
        let flow = definition().build().unwrap();
        let safety = flow.safety();

        assert_eq!(safety.len(), 3);
        assert_eq!(safety[0].category, HarmCategory::DangerousContent);
        assert_eq!(safety[0].threshold, HarmBlockThreshold::BlockOnlyHigh);
        assert_eq!(safety[1].category, HarmCategory::Harassment);
        assert_eq!(safety[1].threshold, HarmBlockThreshold::BlockMediumAndAbove);
        assert_eq!(safety[2].category, HarmCategory::SexuallyExplicit);
        assert_eq!(safety[2].threshold, HarmBlockThreshold::BlockLowAndAbove);
    }

    #[tokio::test]
    async fn omitted_count_requests_three_variations() {
        let backend = StubBackend::returning(two_variations());

        generate_ad_copy_variations(&backend, &input(), &InvokeOptions::default())
            .await
            .unwrap();

        assert!(backend.last_prompt().contains("Write 3 distinct ad copy variations"));
    }

    #[tokio::test]
    async fn ad_concept_appears_in_prompt() {
        let backend = StubBackend::returning(two_variations());

        let out = generate_ad_copy_variations(&backend, &input(), &InvokeOptions::default())
            .await
            .unwrap();

        assert_eq!(out.variations.len(), 2);
        assert_eq!(out.variations[0].call_to_action, "Shop now");
        assert!(backend.last_prompt().contains("Ad concept: Summer Glow\n"));
        assert_eq!(backend.requests()[0].safety.len(), 3);
    }

    #[tokio::test]
    async fn explicit_count_is_rendered() {
        let backend = StubBackend::returning(two_variations());
        let mut input = input();
        input.number_of_variations = Some(5);

        generate_ad_copy_variations(&backend, &input, &InvokeOptions::default())
            .await
            .unwrap();

        assert!(backend.last_prompt().contains("Write 5 distinct"));
    }

    #[tokio::test]
    async fn count_outside_limits_is_rejected_before_backend() {
        let backend = StubBackend::returning(two_variations());
        let mut options = InvokeOptions::default();
        options.limits.max_variations = 4;

        for count in [0, 5] {
            let mut input = input();
            input.number_of_variations = Some(count);
            let err = generate_ad_copy_variations(&backend, &input, &options)
                .await
                .unwrap_err();
            assert!(matches!(err, StratlifyError::ValidationError(_)));
            assert!(err.to_string().contains("between 1 and 4"));
        }
        assert_eq!(backend.call_count(), 0);
    }

    #[test]
    fn count_beyond_i64_is_rejected() {
        let flow = definition().build().unwrap();
        let mut record = serde_json::to_value(input()).unwrap();
        record["numberOfVariations"] = json!(u64::MAX);

        let err = flow.prepare(&record, &InvokeOptions::default()).unwrap_err();

        assert!(matches!(err, StratlifyError::ValidationError(_)));
        assert!(err.to_string().contains("18446744073709551615"));
    }

    #[test]
    fn negative_count_is_rejected() {
        let flow = definition().build().unwrap();
        let mut record = serde_json::to_value(input()).unwrap();
        record["numberOfVariations"] = json!(-2);

        let err = flow.prepare(&record, &InvokeOptions::default()).unwrap_err();

        assert!(err.to_string().contains("between 1 and 10 (got -2)"));
    }

    #[tokio::test]
    async fn missing_field_in_variation_is_generation_error() {
        let backend = StubBackend::returning(json!({
            "variations": [
                {"headline": "Glow", "bodyCopy": "Copy", "callToAction": "Buy"},
                {"headline": "Glow", "bodyCopy": "Copy"}
            ]
        }));

        let err = generate_ad_copy_variations(&backend, &input(), &InvokeOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StratlifyError::GenerationError(_)));
        assert!(err.to_string().contains("variations[1].callToAction"));
    }

    #[tokio::test]
    async fn no_output_is_generation_error() {
        let backend = StubBackend::new(Reply::Nothing);

        let err = generate_ad_copy_variations(&backend, &input(), &InvokeOptions::default())
            .await
            .unwrap_err();

        assert!(matches!(err, StratlifyError::GenerationError(_)));
    }

    #[tokio::test]
    async fn safety_override_replaces_defaults() {
        let backend = StubBackend::returning(two_variations());
        let mut options = InvokeOptions::default();
        options.safety_overrides.insert(NAME.to_string(), Vec::new());

        generate_ad_copy_variations(&backend, &input(), &options)
            .await
            .unwrap();

        assert!(backend.requests()[0].safety.is_empty());
    }
}
