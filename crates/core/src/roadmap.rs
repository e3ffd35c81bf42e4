//! Roadmap domain records and progress roll-ups.

use serde::{Deserialize, Serialize};

use crate::brain_type::BrainType;
use crate::types::{DbId, Timestamp};

/// Description used when neither the resource nor a tip supplies one.
pub const PLACEHOLDER_DESCRIPTION: &str = "Complete this learning step.";

/// Estimated minutes assumed for resources that carry no estimate.
pub const DEFAULT_STEP_MINUTES: i32 = 60;

/// A learning-content reference from the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub url: Option<String>,
    pub estimated_time_minutes: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// One entry of a roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// 1-based and dense within a roadmap.
    pub step_number: i32,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub resource_id: Option<DbId>,
    pub resource_type: String,
    #[serde(default)]
    pub resource_url: Option<String>,
    pub estimated_time_minutes: i32,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brain_type_optimized: bool,
    /// Phase label for AI-authored steps (`beginner`, `advanced`, ...).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<String>,
}

/// A persisted roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Roadmap {
    pub id: DbId,
    pub user_id: DbId,
    pub topic: String,
    pub brain_type: BrainType,
    pub intensity: String,
    pub steps: Vec<Step>,
    pub estimated_completion_weeks: i32,
    pub daily_time_minutes: i32,
    pub ai_generated: bool,
    pub overview: Option<String>,
    #[serde(default)]
    pub strategies: Vec<String>,
    #[serde(default)]
    pub references: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Roadmap {
    pub fn step(&self, step_number: i32) -> Option<&Step> {
        self.steps.iter().find(|s| s.step_number == step_number)
    }
}

/// A roadmap that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRoadmap {
    pub user_id: DbId,
    pub topic: String,
    pub brain_type: BrainType,
    pub intensity: String,
    pub steps: Vec<Step>,
    pub estimated_completion_weeks: i32,
    pub daily_time_minutes: i32,
    pub ai_generated: bool,
    pub overview: Option<String>,
    pub strategies: Vec<String>,
    pub references: Vec<String>,
}

/// Completion state of one step for one user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressRecord {
    pub id: DbId,
    pub user_id: DbId,
    pub roadmap_id: DbId,
    pub step_number: i32,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A NeuroNav learner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub brain_type: Option<BrainType>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Progress roll-ups
// ---------------------------------------------------------------------------

/// Round to one decimal place.
pub fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Completion percentage in `[0, 100]`, rounded to one decimal. Zero totals give 0.
pub fn completion_percentage(completed: usize, total: usize) -> f64 {
    if total == 0 {
        return 0.0;
    }
    round_to_tenth(completed as f64 / total as f64 * 100.0)
}

/// Progress of a single roadmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapProgress {
    pub roadmap_id: DbId,
    pub topic: String,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub completion_percentage: f64,
    pub last_activity: Option<Timestamp>,
}

impl RoadmapProgress {
    /// Roll up the records of one roadmap. Records for step numbers the
    /// roadmap does not contain are ignored.
    pub fn from_records(roadmap: &Roadmap, records: &[ProgressRecord]) -> Self {
        let relevant = records
            .iter()
            .filter(|r| r.roadmap_id == roadmap.id && roadmap.step(r.step_number).is_some());

        let mut completed_steps = 0;
        let mut last_activity: Option<Timestamp> = None;
        for record in relevant {
            if record.completed {
                completed_steps += 1;
            }
            last_activity = Some(match last_activity {
                Some(ts) if ts >= record.updated_at => ts,
                _ => record.updated_at,
            });
        }

        let total_steps = roadmap.steps.len();
        Self {
            roadmap_id: roadmap.id,
            topic: roadmap.topic.clone(),
            total_steps,
            completed_steps,
            completion_percentage: completion_percentage(completed_steps, total_steps),
            last_activity,
        }
    }
}

/// Progress across all of a user's roadmaps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressSummary {
    pub roadmaps: Vec<RoadmapProgress>,
    pub total_roadmaps: usize,
    pub total_steps: usize,
    pub completed_steps: usize,
    pub overall_percentage: f64,
}

impl ProgressSummary {
    pub fn from_roadmaps(roadmaps: Vec<RoadmapProgress>) -> Self {
        let total_steps = roadmaps.iter().map(|r| r.total_steps).sum();
        let completed_steps = roadmaps.iter().map(|r| r.completed_steps).sum();
        Self {
            total_roadmaps: roadmaps.len(),
            total_steps,
            completed_steps,
            overall_percentage: completion_percentage(completed_steps, total_steps),
            roadmaps,
        }
    }
}
