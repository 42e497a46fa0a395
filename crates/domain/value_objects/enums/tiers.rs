use std::fmt::Display;

use serde::{Deserialize, Serialize};

const SHARED_FEATURES: [&str; 2] = ["All MCQs Unlocked", "Premium Notes"];
const ULTRA_EXTRAS: [&str; 2] = ["Video Lectures", "PDF Downloads"];

/// Pricing variant of a subscription plan.
#[derive(Default, Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Tier {
    #[default]
    Basic,
    Ultra,
}

impl Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tier = match self {
            Tier::Basic => "BASIC",
            Tier::Ultra => "ULTRA",
        };
        write!(f, "{}", tier)
    }
}

impl Tier {
    /// Case-insensitive; unknown values fall back to `Basic` like the tab default.
    pub fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_uppercase().as_str() {
            "ULTRA" => Tier::Ultra,
            _ => Tier::Basic,
        }
    }

    /// Features every plan card lists for this tier, ahead of the plan's own.
    pub fn base_features(&self) -> Vec<String> {
        let extras: &[&str] = match self {
            Tier::Basic => &[],
            Tier::Ultra => &ULTRA_EXTRAS,
        };
        SHARED_FEATURES
            .iter()
            .chain(extras.iter())
            .map(|feature| feature.to_string())
            .collect()
    }

    /// Short content summary quoted in the purchase message.
    pub fn purchase_summary(&self) -> &'static str {
        match self {
            Tier::Basic => "MCQ + Notes",
            Tier::Ultra => "PDF + Videos",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_values_case_insensitively() {
        assert_eq!(Tier::from_str("ULTRA"), Tier::Ultra);
        assert_eq!(Tier::from_str("ultra"), Tier::Ultra);
        assert_eq!(Tier::from_str("basic"), Tier::Basic);
        assert_eq!(Tier::from_str("gold"), Tier::Basic);
    }

    #[test]
    fn ultra_extends_basic_features() {
        assert_eq!(
            Tier::Basic.base_features(),
            vec!["All MCQs Unlocked", "Premium Notes"]
        );
        assert_eq!(
            Tier::Ultra.base_features(),
            vec![
                "All MCQs Unlocked",
                "Premium Notes",
                "Video Lectures",
                "PDF Downloads"
            ]
        );
    }

    #[test]
    fn serializes_uppercase() {
        assert_eq!(serde_json::to_string(&Tier::Ultra).unwrap(), "\"ULTRA\"");
        assert_eq!(Tier::Basic.to_string(), "BASIC");
    }
}
