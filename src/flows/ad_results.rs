//! `summarizeAdResults`: summarize ad performance data with suggestions.

use crate::backend::GenerativeBackend;
use crate::error::Result;
use crate::flow::{Flow, FlowDefinition, InvokeOptions};
use crate::schema::{FieldSpec, FieldType, Shape};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const NAME: &str = "summarizeAdResults";

const TEMPLATE: &str = "\
You are a performance marketing analyst. Review the ad performance data \
below. Summarize what worked and what did not, then give concrete, \
prioritized suggestions for the next round of ads.

Ad performance data:
{adPerformanceData:raw}
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResultsInput {
    pub ad_performance_data: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdResultsSummary {
    pub summary: String,
    pub suggestions: String,
}

pub(crate) fn definition() -> FlowDefinition {
    FlowDefinition::new(NAME)
        .description("Summarize ad performance data and suggest improvements")
        .input(
            Shape::new().field(
                FieldSpec::required("adPerformanceData", FieldType::String)
                    .non_empty()
                    .describe("Metrics, notes or exported results for one or more ads"),
            ),
        )
        .output(
            Shape::new()
                .field(
                    FieldSpec::required("summary", FieldType::String)
                        .non_empty()
                        .describe("What the data shows"),
                )
                .field(
                    FieldSpec::required("suggestions", FieldType::String)
                        .non_empty()
                        .describe("Recommended next steps"),
                ),
        )
        .template(TEMPLATE)
}

pub(crate) static FLOW: LazyLock<Flow<AdResultsInput, AdResultsSummary>> = LazyLock::new(|| {
    Flow::new(
        definition()
            .build()
            .expect("Invalid summarizeAdResults definition"),
    )
});

/// Summarize ad performance data.
pub async fn summarize_ad_results(
    backend: &dyn GenerativeBackend,
    input: &AdResultsInput,
    options: &InvokeOptions,
) -> Result<AdResultsSummary> {
    FLOW.invoke(backend, input, options).await
}
