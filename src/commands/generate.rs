//! The generation commands: `mechanisms`, `ad-copy`, `summarize`.
//!
//! Each takes either individual flags or a whole JSON record via
//! `--input`. Flags go through the typed flow API; `--input` records go
//! through the untyped one so shape violations are reported field by field.

use super::io::{read_json_input, read_text_file, to_json};
use crate::cli::{AdCopyArgs, MechanismsArgs, SummarizeArgs};
use serde_json::Value;
use stratlify::error::{Result, StratlifyError};
use stratlify::flows::{
    AdCopyVariationsInput, AdResultsInput, FlowClient, FlowKind, MechanismIdeasInput,
};

fn required(value: Option<String>, flag: &str) -> Result<String> {
    value.ok_or_else(|| StratlifyError::UserError(format!("{} is required without --input", flag)))
}

/// Execute the `stratlify mechanisms` command.
pub async fn cmd_mechanisms(client: &FlowClient, args: MechanismsArgs) -> Result<Value> {
    if let Some(path) = args.input {
        return client
            .run(FlowKind::MechanismIdeas, &read_json_input(&path)?)
            .await;
    }

    let input = MechanismIdeasInput {
        product_description: required(args.product_description, "--product-description")?,
    };
    to_json(&client.suggest_mechanism_ideas(&input).await?)
}

/// Execute the `stratlify ad-copy` command.
pub async fn cmd_ad_copy(client: &FlowClient, args: AdCopyArgs) -> Result<Value> {
    if let Some(path) = args.input {
        return client
            .run(FlowKind::AdCopyVariations, &read_json_input(&path)?)
            .await;
    }

    let input = AdCopyVariationsInput {
        ad_concept: required(args.ad_concept, "--ad-concept")?,
        product_description: required(args.product_description, "--product-description")?,
        desired_emotion: required(args.desired_emotion, "--desired-emotion")?,
        target_audience: required(args.target_audience, "--target-audience")?,
        number_of_variations: args.variations,
    };
    to_json(&client.generate_ad_copy_variations(&input).await?)
}

/// Execute the `stratlify summarize` command.
pub async fn cmd_summarize(client: &FlowClient, args: SummarizeArgs) -> Result<Value> {
    if let Some(path) = args.input {
        return client
            .run(FlowKind::AdResults, &read_json_input(&path)?)
            .await;
    }

    let ad_performance_data = match (args.data, args.data_file) {
        (Some(data), _) => data,
        (None, Some(path)) => read_text_file(&path)?,
        (None, None) => {
            return Err(StratlifyError::UserError(
                "one of --data, --data-file or --input is required".to_string(),
            ));
        }
    };
    to_json(
        &client
            .summarize_ad_results(&AdResultsInput {
                ad_performance_data,
            })
            .await?,
    )
}
