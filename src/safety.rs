//! Safety settings passed through to the generative backend.
//!
//! Nothing is enforced locally; the backend blocks generations that exceed
//! a category's threshold.

use serde::{Deserialize, Serialize};

/// Harm category recognized by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmCategory {
    DangerousContent,
    Harassment,
    SexuallyExplicit,
    HateSpeech,
}

impl HarmCategory {
    /// Wire name used by the Gemini API.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::DangerousContent => "HARM_CATEGORY_DANGEROUS_CONTENT",
            Self::Harassment => "HARM_CATEGORY_HARASSMENT",
            Self::SexuallyExplicit => "HARM_CATEGORY_SEXUALLY_EXPLICIT",
            Self::HateSpeech => "HARM_CATEGORY_HATE_SPEECH",
        }
    }
}

/// How aggressively the backend blocks a harm category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HarmBlockThreshold {
    BlockNone,
    BlockOnlyHigh,
    BlockMediumAndAbove,
    BlockLowAndAbove,
}

impl HarmBlockThreshold {
    /// Wire name used by the Gemini API.
    pub fn api_name(self) -> &'static str {
        match self {
            Self::BlockNone => "BLOCK_NONE",
            Self::BlockOnlyHigh => "BLOCK_ONLY_HIGH",
            Self::BlockMediumAndAbove => "BLOCK_MEDIUM_AND_ABOVE",
            Self::BlockLowAndAbove => "BLOCK_LOW_AND_ABOVE",
        }
    }
}

/// One (category, threshold) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetySetting {
    pub category: HarmCategory,
    pub threshold: HarmBlockThreshold,
}

impl SafetySetting {
    pub fn new(category: HarmCategory, threshold: HarmBlockThreshold) -> Self {
        Self {
            category,
            threshold,
        }
    }
}

/// Return the first category that appears more than once, if any.
pub fn duplicate_category(settings: &[SafetySetting]) -> Option<HarmCategory> {
    settings.iter().enumerate().find_map(|(i, s)| {
        settings[..i]
            .iter()
            .any(|earlier| earlier.category == s.category)
            .then_some(s.category)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_spelling() {
        let category: HarmCategory = serde_yaml::from_str("sexually_explicit").unwrap();
        assert_eq!(category, HarmCategory::SexuallyExplicit);
        assert!(serde_yaml::from_str::<HarmCategory>("violence").is_err());

        let threshold: HarmBlockThreshold = serde_yaml::from_str("block_only_high").unwrap();
        assert_eq!(threshold, HarmBlockThreshold::BlockOnlyHigh);
        assert!(serde_yaml::from_str::<HarmBlockThreshold>("BLOCK_ONLY_HIGH").is_err());
    }

    #[test]
    fn test_api_names() {
        assert_eq!(
            HarmCategory::Harassment.api_name(),
            "HARM_CATEGORY_HARASSMENT"
        );
        assert_eq!(
            HarmBlockThreshold::BlockMediumAndAbove.api_name(),
            "BLOCK_MEDIUM_AND_ABOVE"
        );
    }

    #[test]
    fn test_setting_yaml_round_trip() {
        let yaml = "category: dangerous_content\nthreshold: block_low_and_above\n";
        let setting: SafetySetting = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(
            setting,
            SafetySetting::new(
                HarmCategory::DangerousContent,
                HarmBlockThreshold::BlockLowAndAbove
            )
        );
    }

    #[test]
    fn test_duplicate_category() {
        let settings = [
            SafetySetting::new(HarmCategory::Harassment, HarmBlockThreshold::BlockOnlyHigh),
            SafetySetting::new(HarmCategory::HateSpeech, HarmBlockThreshold::BlockNone),
            SafetySetting::new(
                HarmCategory::Harassment,
                HarmBlockThreshold::BlockLowAndAbove,
            ),
        ];
        assert_eq!(duplicate_category(&settings), Some(HarmCategory::Harassment));
        assert_eq!(duplicate_category(&settings[..2]), None);
    }
}
