//! `suggestMechanismIdeas`: propose unique mechanisms for a product.

use crate::backend::GenerativeBackend;
use crate::error::Result;
use crate::flow::{Flow, FlowDefinition, InvokeOptions};
use crate::schema::{FieldSpec, FieldType, Shape};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

pub const NAME: &str = "suggestMechanismIdeas";

const TEMPLATE: &str = "\
You are an expert direct-response copywriter. A unique mechanism is the \
specific process, ingredient or method that explains why a product delivers \
its result when others fail.

Suggest several distinct unique mechanism ideas for the product below. Each \
idea should be one or two sentences, concrete, and believable.

Product description:
{productDescription:raw}
";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanismIdeasInput {
    pub product_description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MechanismIdeasOutput {
    pub suggested_mechanisms: Vec<String>,
}

pub(crate) fn definition() -> FlowDefinition {
    FlowDefinition::new(NAME)
        .description("Suggest unique mechanism ideas for a product")
        .input(
            Shape::new().field(
                FieldSpec::required("productDescription", FieldType::String)
                    .non_empty()
                    .describe("What the product is and what it does"),
            ),
        )
        .output(
            Shape::new().field(
                FieldSpec::required("suggestedMechanisms", FieldType::array_of(FieldType::String))
                    .describe("Unique mechanism ideas, best first"),
            ),
        )
        .template(TEMPLATE)
}

pub(crate) static FLOW: LazyLock<Flow<MechanismIdeasInput, MechanismIdeasOutput>> =
    LazyLock::new(|| {
        Flow::new(
            definition()
                .build()
                .expect("Invalid suggestMechanismIdeas definition"),
        )
    });

/// Suggest unique mechanism ideas for a product.
pub async fn suggest_mechanism_ideas(
    backend: &dyn GenerativeBackend,
    input: &MechanismIdeasInput,
    options: &InvokeOptions,
) -> Result<MechanismIdeasOutput> {
    FLOW.invoke(backend, input, options).await
}
