//! Match-level classification of (brain type, resource type) pairs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::brain_type::BrainType;
use crate::config::{MatchThresholds, NavigatorConfig};

/// How well a resource type suits a brain type. Always derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchLevel {
    LowMatch,
    MediumMatch,
    HighMatch,
}

impl MatchLevel {
    pub const ALL: [MatchLevel; 3] = [
        MatchLevel::HighMatch,
        MatchLevel::MediumMatch,
        MatchLevel::LowMatch,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            MatchLevel::HighMatch => "high_match",
            MatchLevel::MediumMatch => "medium_match",
            MatchLevel::LowMatch => "low_match",
        }
    }

    /// Bucket a raw weight. `high` and `low` are inclusive lower bounds.
    pub fn from_weight(weight: f64, thresholds: &MatchThresholds) -> Self {
        if weight >= thresholds.high {
            MatchLevel::HighMatch
        } else if weight >= thresholds.low {
            MatchLevel::MediumMatch
        } else {
            MatchLevel::LowMatch
        }
    }
}

impl fmt::Display for MatchLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a pair using the zero-default weight lookup.
pub fn classify(config: &NavigatorConfig, brain_type: BrainType, resource_type: &str) -> MatchLevel {
    let weight = config.weight_of(brain_type, resource_type);
    MatchLevel::from_weight(weight, &config.thresholds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn visual_course_is_low() {
        let c = NavigatorConfig::default();
        assert_eq!(classify(&c, BrainType::Visual, "course"), MatchLevel::LowMatch);
    }

    #[test]
    fn visual_video_is_high() {
        let c = NavigatorConfig::default();
        assert_eq!(classify(&c, BrainType::Visual, "video"), MatchLevel::HighMatch);
    }

    #[test]
    fn visual_article_is_medium() {
        let c = NavigatorConfig::default();
        assert_eq!(classify(&c, BrainType::Visual, "article"), MatchLevel::MediumMatch);
    }

    #[test]
    fn podcast_counts_as_video_for_visual() {
        let c = NavigatorConfig::default();
        assert_eq!(classify(&c, BrainType::Visual, "podcast"), MatchLevel::HighMatch);
    }

    #[test]
    fn unknown_resource_type_is_low() {
        let c = NavigatorConfig::default();
        assert_eq!(classify(&c, BrainType::ReadWrite, "hologram"), MatchLevel::LowMatch);
    }

    #[test]
    fn thresholds_are_inclusive_lower_bounds() {
        let t = MatchThresholds::default();
        assert_eq!(MatchLevel::from_weight(0.25, &t), MatchLevel::HighMatch);
        assert_eq!(MatchLevel::from_weight(0.15, &t), MatchLevel::MediumMatch);
        assert_eq!(MatchLevel::from_weight(0.149_999, &t), MatchLevel::LowMatch);
    }

    #[test]
    fn level_never_decreases_as_weight_rises() {
        let t = MatchThresholds::default();
        let mut previous = MatchLevel::LowMatch;
        for step in 0..=100 {
            let level = MatchLevel::from_weight(f64::from(step) / 100.0, &t);
            assert!(level >= previous, "level dropped at weight {step}/100");
            previous = level;
        }
    }

    #[test]
    fn custom_thresholds_are_honoured() {
        let mut c = NavigatorConfig::default();
        c.thresholds = MatchThresholds {
            high: 0.45,
            low: 0.35,
        };
        assert_eq!(classify(&c, BrainType::Visual, "video"), MatchLevel::MediumMatch);
    }

    #[test]
    fn serializes_snake_case() {
        let json = serde_json::to_string(&MatchLevel::MediumMatch).unwrap();
        assert_eq!(json, "\"medium_match\"");
    }
}
