//! Learning-style categories ("brain types") and their static profile text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// VARK-style learning-style category assigned to a user.
///
/// Serialized by its canonical name (`"Visual"`, `"Auditory"`,
/// `"ReadWrite"`, `"Kinesthetic"`), which also makes it usable as a map key
/// in JSON and TOML documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum BrainType {
    Visual,
    Auditory,
    ReadWrite,
    Kinesthetic,
}

/// Descriptive profile returned alongside an assessment result.
#[derive(Debug, Clone, Serialize)]
pub struct BrainTypeProfile {
    pub description: &'static str,
    pub learning_tips: &'static [&'static str],
    pub strengths: &'static [&'static str],
}

impl BrainType {
    /// Every brain type, in tie-break order for assessment scoring.
    pub const ALL: [BrainType; 4] = [
        BrainType::Visual,
        BrainType::Auditory,
        BrainType::ReadWrite,
        BrainType::Kinesthetic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BrainType::Visual => "Visual",
            BrainType::Auditory => "Auditory",
            BrainType::ReadWrite => "ReadWrite",
            BrainType::Kinesthetic => "Kinesthetic",
        }
    }

    /// One-line study tip appended to ranked step descriptions.
    pub fn study_tip(self) -> &'static str {
        match self {
            BrainType::Visual => {
                "Focus on visual elements, diagrams, and interactive demonstrations."
            }
            BrainType::Auditory => {
                "Listen carefully to explanations and consider discussing concepts with others."
            }
            BrainType::ReadWrite => {
                "Take detailed notes and create written summaries of key concepts."
            }
            BrainType::Kinesthetic => {
                "Practice hands-on exercises and apply concepts through real projects."
            }
        }
    }

    pub fn profile(self) -> BrainTypeProfile {
        match self {
            BrainType::Visual => BrainTypeProfile {
                description:
                    "You learn best through visual aids like diagrams, charts, and videos.",
                learning_tips: &[
                    "Use mind maps and flowcharts",
                    "Watch educational videos",
                    "Use colorful notes and highlighters",
                    "Create visual associations",
                ],
                strengths: &["Pattern recognition", "Spatial awareness", "Visual memory"],
            },
            BrainType::Auditory => BrainTypeProfile {
                description: "You learn best through listening and verbal instruction.",
                learning_tips: &[
                    "Listen to podcasts and lectures",
                    "Discuss topics with others",
                    "Read aloud",
                    "Use verbal repetition",
                ],
                strengths: &[
                    "Verbal communication",
                    "Listening skills",
                    "Music appreciation",
                ],
            },
            BrainType::ReadWrite => BrainTypeProfile {
                description: "You learn best through reading and writing activities.",
                learning_tips: &[
                    "Take detailed notes",
                    "Create lists and outlines",
                    "Read extensively",
                    "Write summaries",
                ],
                strengths: &[
                    "Written communication",
                    "Research skills",
                    "Critical analysis",
                ],
            },
            BrainType::Kinesthetic => BrainTypeProfile {
                description: "You learn best through hands-on activities and movement.",
                learning_tips: &[
                    "Practice with real examples",
                    "Use hands-on activities",
                    "Take breaks for movement",
                    "Build projects",
                ],
                strengths: &[
                    "Problem-solving",
                    "Practical application",
                    "Physical coordination",
                ],
            },
        }
    }
}

impl fmt::Display for BrainType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BrainType {
    type Err = CoreError;

    /// Case-insensitive; separators are ignored so `read/write`,
    /// `Read_Write` and `Reading/Writing` all parse as [`BrainType::ReadWrite`].
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        match key.as_str() {
            "visual" => Ok(BrainType::Visual),
            "auditory" => Ok(BrainType::Auditory),
            "readwrite" | "readingwriting" => Ok(BrainType::ReadWrite),
            "kinesthetic" => Ok(BrainType::Kinesthetic),
            _ => Err(CoreError::Validation(format!("Unknown brain type '{s}'"))),
        }
    }
}

impl TryFrom<String> for BrainType {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<BrainType> for String {
    fn from(value: BrainType) -> Self {
        value.as_str().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_canonical_names() {
        for bt in BrainType::ALL {
            assert_eq!(bt.as_str().parse::<BrainType>().unwrap(), bt);
        }
    }

    #[test]
    fn parses_loose_spellings() {
        assert_eq!("visual".parse::<BrainType>().unwrap(), BrainType::Visual);
        assert_eq!("Read/Write".parse::<BrainType>().unwrap(), BrainType::ReadWrite);
        assert_eq!(
            "reading/writing".parse::<BrainType>().unwrap(),
            BrainType::ReadWrite
        );
        assert_eq!(" KINESTHETIC ".parse::<BrainType>().unwrap(), BrainType::Kinesthetic);
    }

    #[test]
    fn rejects_unknown_name() {
        assert!("olfactory".parse::<BrainType>().is_err());
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_string(&BrainType::ReadWrite).unwrap();
        assert_eq!(json, "\"ReadWrite\"");
        let back: BrainType = serde_json::from_str("\"auditory\"").unwrap();
        assert_eq!(back, BrainType::Auditory);
    }

    #[test]
    fn every_type_has_a_tip_and_profile() {
        for bt in BrainType::ALL {
            assert!(!bt.study_tip().is_empty());
            let profile = bt.profile();
            assert!(!profile.description.is_empty());
            assert_eq!(profile.learning_tips.len(), 4);
            assert_eq!(profile.strengths.len(), 3);
        }
    }
}
