//! The Stratlify content-generation flows.
//!
//! - **mechanisms**: `suggestMechanismIdeas`
//! - **ad_copy**: `generateAdCopyVariations`
//! - **ad_results**: `summarizeAdResults`
//!
//! Each flow is built once per process and shared by every call.

pub mod ad_copy;
pub mod ad_results;
mod client;
pub mod mechanisms;

pub use ad_copy::{
    AdCopyVariation, AdCopyVariationsInput, AdCopyVariationsOutput, generate_ad_copy_variations,
};
pub use ad_results::{AdResultsInput, AdResultsSummary, summarize_ad_results};
pub use client::{FlowClient, prepare};
pub use mechanisms::{MechanismIdeasInput, MechanismIdeasOutput, suggest_mechanism_ideas};

use crate::flow::PromptFlow;

/// The built-in flows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FlowKind {
    MechanismIdeas,
    AdCopyVariations,
    AdResults,
}

impl FlowKind {
    /// All flows, in listing order.
    pub fn all() -> &'static [FlowKind] {
        &[
            FlowKind::MechanismIdeas,
            FlowKind::AdCopyVariations,
            FlowKind::AdResults,
        ]
    }

    /// The flow's registered name (also its config key).
    pub fn name(self) -> &'static str {
        match self {
            FlowKind::MechanismIdeas => mechanisms::NAME,
            FlowKind::AdCopyVariations => ad_copy::NAME,
            FlowKind::AdResults => ad_results::NAME,
        }
    }

    /// The CLI subcommand that runs this flow.
    pub fn command(self) -> &'static str {
        match self {
            FlowKind::MechanismIdeas => "mechanisms",
            FlowKind::AdCopyVariations => "ad-copy",
            FlowKind::AdResults => "summarize",
        }
    }

    /// Look up a flow by registered name or by CLI subcommand.
    pub fn from_name(s: &str) -> Option<Self> {
        Self::all()
            .iter()
            .copied()
            .find(|k| k.name() == s || k.command() == s)
    }

    pub fn definition(self) -> &'static PromptFlow {
        match self {
            FlowKind::MechanismIdeas => mechanisms::FLOW.prompt_flow(),
            FlowKind::AdCopyVariations => ad_copy::FLOW.prompt_flow(),
            FlowKind::AdResults => ad_results::FLOW.prompt_flow(),
        }
    }

    pub fn description(self) -> &'static str {
        self.definition().description()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_name_and_command() {
        assert_eq!(
            FlowKind::from_name("generateAdCopyVariations"),
            Some(FlowKind::AdCopyVariations)
        );
        assert_eq!(FlowKind::from_name("ad-copy"), Some(FlowKind::AdCopyVariations));
        assert_eq!(FlowKind::from_name("summarize"), Some(FlowKind::AdResults));
        assert_eq!(FlowKind::from_name("writeMyEssay"), None);
    }

    #[test]
    fn definitions_match_kinds() {
        for kind in FlowKind::all() {
            assert_eq!(kind.definition().name(), kind.name());
            assert!(!kind.description().is_empty());
        }
    }

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = FlowKind::all().iter().map(|k| k.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), FlowKind::all().len());
    }
}
