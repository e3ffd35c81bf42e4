//! Navigator configuration: preference weights, synonyms, match thresholds
//! and intensity tables.
//!
//! A [`NavigatorConfig`] is built once at startup (defaults, optionally
//! overridden by a TOML file), validated, and then shared read-only behind an
//! `Arc` by every component that scores or classifies resources.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::brain_type::BrainType;
use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Allowed deviation from 1.0 when summing a brain type's weights.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-6;

/// Weight used by the classifier for pairs absent from the preference table.
pub const DEFAULT_MISSING_WEIGHT: f64 = 0.0;

/// Score used by the ranker for pairs absent from the preference table.
pub const DEFAULT_RANKING_FALLBACK_WEIGHT: f64 = 0.1;

pub const DEFAULT_HIGH_THRESHOLD: f64 = 0.25;
pub const DEFAULT_LOW_THRESHOLD: f64 = 0.15;

/// Step budget for intensities missing from the budget table.
pub const DEFAULT_STEP_BUDGET: usize = 8;

/// Number of catalog resources requested when a topic has no matches.
pub const DEFAULT_GENERAL_RESOURCE_LIMIT: usize = 10;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Cut-offs separating high, medium and low match levels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MatchThresholds {
    pub high: f64,
    pub low: f64,
}

impl Default for MatchThresholds {
    fn default() -> Self {
        Self {
            high: DEFAULT_HIGH_THRESHOLD,
            low: DEFAULT_LOW_THRESHOLD,
        }
    }
}

/// Daily time budget and overall duration for an intensity level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    pub daily_minutes: i32,
    pub total_weeks: i32,
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            daily_minutes: 60,
            total_weeks: 6,
        }
    }
}

/// Minimum amount of data an engagement analysis needs to be meaningful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisRequirements {
    pub min_users: usize,
    pub min_events: usize,
}

impl Default for AnalysisRequirements {
    fn default() -> Self {
        Self {
            min_users: 1,
            min_events: 5,
        }
    }
}

/// Immutable configuration shared by the ranker, classifier and analytics.
///
/// Every field has a built-in default; a TOML file only needs the keys it
/// overrides. Keys of `step_budgets` and `schedules` are intensity names and
/// are matched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigatorConfig {
    pub missing_weight: f64,
    pub ranking_fallback_weight: f64,
    pub default_step_budget: usize,
    pub general_resource_limit: usize,
    pub thresholds: MatchThresholds,
    pub default_schedule: Schedule,
    pub analysis: AnalysisRequirements,
    pub synonyms: BTreeMap<String, String>,
    pub step_budgets: BTreeMap<String, usize>,
    pub schedules: BTreeMap<String, Schedule>,
    pub preferences: BTreeMap<BrainType, BTreeMap<String, f64>>,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            missing_weight: DEFAULT_MISSING_WEIGHT,
            ranking_fallback_weight: DEFAULT_RANKING_FALLBACK_WEIGHT,
            default_step_budget: DEFAULT_STEP_BUDGET,
            general_resource_limit: DEFAULT_GENERAL_RESOURCE_LIMIT,
            thresholds: MatchThresholds::default(),
            default_schedule: Schedule::default(),
            analysis: AnalysisRequirements::default(),
            synonyms: default_synonyms(),
            step_budgets: default_step_budgets(),
            schedules: default_schedules(),
            preferences: default_preferences(),
        }
    }
}

fn weights(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, w)| (k.to_string(), *w)).collect()
}

fn default_preferences() -> BTreeMap<BrainType, BTreeMap<String, f64>> {
    BTreeMap::from([
        (
            BrainType::Visual,
            weights(&[("video", 0.4), ("tutorial", 0.3), ("article", 0.2), ("course", 0.1)]),
        ),
        (
            BrainType::Auditory,
            weights(&[("course", 0.4), ("video", 0.3), ("podcast", 0.2), ("article", 0.1)]),
        ),
        (
            BrainType::ReadWrite,
            weights(&[("article", 0.4), ("book", 0.3), ("tutorial", 0.2), ("course", 0.1)]),
        ),
        (
            BrainType::Kinesthetic,
            weights(&[("tutorial", 0.4), ("exercise", 0.3), ("course", 0.2), ("video", 0.1)]),
        ),
    ])
}

fn default_synonyms() -> BTreeMap<String, String> {
    [
        ("video", "video"),
        ("article", "article"),
        ("tutorial", "tutorial"),
        ("course", "course"),
        ("book", "article"),
        ("podcast", "video"),
        ("exercise", "tutorial"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

fn default_step_budgets() -> BTreeMap<String, usize> {
    BTreeMap::from([
        ("beginner".to_string(), 6),
        ("intermediate".to_string(), 8),
        ("advanced".to_string(), 10),
    ])
}

fn default_schedules() -> BTreeMap<String, Schedule> {
    BTreeMap::from([
        (
            "beginner".to_string(),
            Schedule {
                daily_minutes: 30,
                total_weeks: 8,
            },
        ),
        (
            "intermediate".to_string(),
            Schedule {
                daily_minutes: 60,
                total_weeks: 6,
            },
        ),
        (
            "advanced".to_string(),
            Schedule {
                daily_minutes: 90,
                total_weeks: 4,
            },
        ),
    ])
}

// ---------------------------------------------------------------------------
// Loading & validation
// ---------------------------------------------------------------------------

/// Validate that a value falls within `[0.0, 1.0]`.
fn validate_unit_range(value: f64, name: &str) -> Result<(), CoreError> {
    if !(0.0..=1.0).contains(&value) {
        return Err(CoreError::Validation(format!(
            "{name} must be between 0.0 and 1.0, got {value}"
        )));
    }
    Ok(())
}

fn intensity_key(intensity: &str) -> String {
    intensity.trim().to_lowercase()
}

impl NavigatorConfig {
    /// Parse and validate a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, CoreError> {
        let config: NavigatorConfig = toml::from_str(source)
            .map_err(|e| CoreError::Validation(format!("Invalid navigator config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            CoreError::Validation(format!(
                "Cannot read navigator config {}: {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&source)
    }

    /// Check every invariant the scoring code relies on.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_unit_range(self.missing_weight, "missing_weight")?;
        validate_unit_range(self.ranking_fallback_weight, "ranking_fallback_weight")?;
        validate_unit_range(self.thresholds.high, "thresholds.high")?;
        validate_unit_range(self.thresholds.low, "thresholds.low")?;
        if self.thresholds.low > self.thresholds.high {
            return Err(CoreError::Validation(format!(
                "thresholds.low ({}) must not exceed thresholds.high ({})",
                self.thresholds.low, self.thresholds.high
            )));
        }

        for (brain_type, table) in &self.preferences {
            let mut sum = 0.0;
            for (resource_type, weight) in table {
                validate_unit_range(*weight, &format!("preferences.{brain_type}.{resource_type}"))?;
                sum += weight;
            }
            if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
                return Err(CoreError::Validation(format!(
                    "preferences.{brain_type} weights must sum to 1.0, got {sum}"
                )));
            }
        }

        if self.default_step_budget == 0 || self.step_budgets.values().any(|b| *b == 0) {
            return Err(CoreError::Validation(
                "Step budgets must be greater than zero".to_string(),
            ));
        }

        let schedules = std::iter::once(&self.default_schedule).chain(self.schedules.values());
        for schedule in schedules {
            if schedule.daily_minutes <= 0 || schedule.total_weeks <= 0 {
                return Err(CoreError::Validation(
                    "Schedules must have positive daily_minutes and total_weeks".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Number of steps a roadmap of the given intensity may hold.
    pub fn step_budget(&self, intensity: &str) -> usize {
        match self.step_budgets.get(&intensity_key(intensity)) {
            Some(budget) => *budget,
            None => {
                tracing::debug!(intensity, "Unknown intensity, using default step budget");
                self.default_step_budget
            }
        }
    }

    /// Daily minutes and total weeks for the given intensity.
    pub fn schedule(&self, intensity: &str) -> Schedule {
        match self.schedules.get(&intensity_key(intensity)) {
            Some(schedule) => *schedule,
            None => {
                tracing::debug!(intensity, "Unknown intensity, using default schedule");
                self.default_schedule
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn default_config_is_valid() {
        assert!(NavigatorConfig::default().validate().is_ok());
    }

    #[test]
    fn default_weights_sum_to_one() {
        let config = NavigatorConfig::default();
        for bt in BrainType::ALL {
            let sum: f64 = config.preferences[&bt].values().sum();
            assert!((sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE, "{bt} sums to {sum}");
        }
    }

    #[test]
    fn step_budget_known_intensities() {
        let config = NavigatorConfig::default();
        assert_eq!(config.step_budget("beginner"), 6);
        assert_eq!(config.step_budget("Intermediate"), 8);
        assert_eq!(config.step_budget(" advanced "), 10);
    }

    #[test]
    fn step_budget_unknown_intensity_defaults_to_eight() {
        assert_eq!(NavigatorConfig::default().step_budget("expert"), 8);
    }

    #[test]
    fn schedule_tables() {
        let config = NavigatorConfig::default();
        assert_eq!(
            config.schedule("beginner"),
            Schedule {
                daily_minutes: 30,
                total_weeks: 8
            }
        );
        assert_eq!(config.schedule("advanced").daily_minutes, 90);
        assert_eq!(config.schedule("marathon"), Schedule::default());
    }

    #[test]
    fn toml_overrides_only_given_keys() {
        let config = NavigatorConfig::from_toml_str(
            r#"
            ranking_fallback_weight = 0.05

            [thresholds]
            high = 0.3
            low = 0.2
            "#,
        )
        .unwrap();
        assert_eq!(config.ranking_fallback_weight, 0.05);
        assert_eq!(config.thresholds.high, 0.3);
        assert_eq!(config.step_budget("beginner"), 6);
        assert_eq!(config.preferences.len(), 4);
    }

    #[test]
    fn toml_preference_table_replaces_defaults() {
        let config = NavigatorConfig::from_toml_str(
            r#"
            [preferences.Visual]
            video = 0.5
            article = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.preferences.len(), 1);
        assert_eq!(config.preferences[&BrainType::Visual]["video"], 0.5);
    }

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let result = NavigatorConfig::from_toml_str(
            r#"
            [preferences.Auditory]
            podcast = 0.5
            "#,
        );
        assert_matches!(result, Err(CoreError::Validation(msg)) if msg.contains("sum to 1.0"));
    }

    #[test]
    fn rejects_inverted_thresholds() {
        let mut config = NavigatorConfig::default();
        config.thresholds = MatchThresholds {
            high: 0.1,
            low: 0.2,
        };
        assert_matches!(config.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_weight_out_of_range() {
        let mut config = NavigatorConfig::default();
        config.ranking_fallback_weight = 1.5;
        assert_matches!(config.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_zero_step_budget() {
        let mut config = NavigatorConfig::default();
        config.step_budgets.insert("beginner".into(), 0);
        assert_matches!(config.validate(), Err(CoreError::Validation(_)));
    }

    #[test]
    fn rejects_unknown_brain_type_key() {
        let result = NavigatorConfig::from_toml_str(
            r#"
            [preferences.Olfactory]
            video = 1.0
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("navigator.toml");
        std::fs::write(&path, "default_step_budget = 12\n").unwrap();
        let config = NavigatorConfig::load(&path).unwrap();
        assert_eq!(config.step_budget("unknown"), 12);
    }

    #[test]
    fn missing_file_is_a_validation_error() {
        let result = NavigatorConfig::load(Path::new("/definitely/not/here.toml"));
        assert_matches!(result, Err(CoreError::Validation(_)));
    }
}
