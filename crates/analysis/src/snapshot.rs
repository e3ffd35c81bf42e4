//! JSON snapshot input and output.
//!
//! A snapshot is an export of the three tables the analysis reads:
//!
//! ```json
//! {
//!   "users":    [{ "id": 1, "brain_type": "Visual" }],
//!   "roadmaps": [{ "id": 10, "user_id": 1, "topic": "Python", "brain_type": "Visual",
//!                  "steps": [{ "step_number": 1, "title": "...", "description": "...",
//!                              "resource_type": "video", "estimated_time_minutes": 30 }] }],
//!   "progress": [{ "user_id": 1, "roadmap_id": 10, "step_number": 1, "completed": true,
//!                  "created_at": "2024-03-01T10:00:00Z", "completed_at": "2024-03-01 10:45:00" }]
//! }
//! ```
//!
//! Records are decoded one at a time: a user, roadmap, step or progress entry
//! that does not fit its shape is logged and skipped, and the rest of the
//! snapshot is still analyzed. Timestamps are accepted as RFC 3339 or as
//! naive `YYYY-MM-DD HH:MM:SS` (UTC). Anything else is logged and treated as
//! missing.

use std::collections::HashMap;
use std::path::Path;

use anyhow::Context;
use chrono::{DateTime, NaiveDateTime, Utc};
use neuronav_core::analytics::ProgressObservation;
use neuronav_core::brain_type::BrainType;
use neuronav_core::generation::DEFAULT_INTENSITY;
use neuronav_core::roadmap::{Roadmap, Step};
use neuronav_core::types::{DbId, Timestamp};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

use crate::dataset::Dataset;

const NAIVE_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A record kind that can appear in a snapshot list.
trait SnapshotRecord: DeserializeOwned {
    const KIND: &'static str;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotUser {
    pub id: DbId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain_type: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotStep {
    pub step_number: i32,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub resource_type: String,
    pub estimated_time_minutes: f64,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub brain_type_optimized: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRoadmap {
    pub id: DbId,
    pub user_id: DbId,
    pub topic: String,
    /// Informational; events are classified with the learner's brain type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brain_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub steps: Vec<SnapshotStep>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotProgress {
    pub user_id: DbId,
    pub roadmap_id: DbId,
    pub step_number: i32,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
}

impl SnapshotRecord for SnapshotUser {
    const KIND: &'static str = "user";
}

impl SnapshotRecord for SnapshotStep {
    const KIND: &'static str = "step";
}

impl SnapshotRecord for SnapshotRoadmap {
    const KIND: &'static str = "roadmap";
}

impl SnapshotRecord for SnapshotProgress {
    const KIND: &'static str = "progress";
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default, deserialize_with = "lenient_records")]
    pub users: Vec<SnapshotUser>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub roadmaps: Vec<SnapshotRoadmap>,
    #[serde(default, deserialize_with = "lenient_records")]
    pub progress: Vec<SnapshotProgress>,
}

/// Decode a JSON list record by record, dropping the entries that fail.
/// A `null` list is treated as empty.
fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: SnapshotRecord,
{
    let raw = Option::<Vec<serde_json::Value>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(kind = T::KIND, index, error = %e, "Skipping malformed snapshot record");
                None
            }
        })
        .collect())
}

// ---------------------------------------------------------------------------
// Timestamps
// ---------------------------------------------------------------------------

/// Parse a timestamp leniently. Malformed values yield `None` with a warning.
pub fn parse_timestamp(raw: &str) -> Option<Timestamp> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.with_timezone(&Utc));
    }
    for format in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(naive.and_utc());
        }
    }
    tracing::warn!(value = raw, "Ignoring malformed timestamp");
    None
}

fn parse_optional(raw: Option<&str>) -> Option<Timestamp> {
    raw.and_then(parse_timestamp)
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

impl SnapshotStep {
    fn into_step(self, roadmap_id: DbId) -> Option<Step> {
        let minutes = self.estimated_time_minutes;
        if !minutes.is_finite() || minutes < 0.0 || minutes > f64::from(i32::MAX) {
            tracing::warn!(
                roadmap_id,
                step_number = self.step_number,
                minutes,
                "Skipping step with an invalid time estimate"
            );
            return None;
        }
        Some(Step {
            step_number: self.step_number,
            title: self.title,
            description: self.description,
            resource_id: None,
            resource_type: self.resource_type,
            resource_url: None,
            estimated_time_minutes: minutes.round() as i32,
            tags: self.tags,
            brain_type_optimized: self.brain_type_optimized,
            phase: None,
        })
    }
}

impl SnapshotRoadmap {
    /// Only the topic and steps matter to the analysis; the schedule fields
    /// are not part of a snapshot. An unreadable brain type falls back to the
    /// owner's, and the roadmap is dropped when neither is known (its events
    /// could not be classified anyway).
    fn into_roadmap(self, brain_types: &HashMap<DbId, BrainType>) -> Option<Roadmap> {
        let brain_type = match self.brain_type.as_deref().map(str::parse::<BrainType>) {
            Some(Ok(bt)) => Some(bt),
            _ => brain_types.get(&self.user_id).copied(),
        };
        let Some(brain_type) = brain_type else {
            tracing::warn!(
                roadmap_id = self.id,
                user_id = self.user_id,
                "Skipping roadmap without a usable brain type"
            );
            return None;
        };

        let created_at =
            parse_optional(self.created_at.as_deref()).unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
        let roadmap_id = self.id;
        Some(Roadmap {
            id: self.id,
            user_id: self.user_id,
            topic: self.topic,
            brain_type,
            intensity: self
                .intensity
                .unwrap_or_else(|| DEFAULT_INTENSITY.to_string()),
            steps: self
                .steps
                .into_iter()
                .filter_map(|step| step.into_step(roadmap_id))
                .collect(),
            estimated_completion_weeks: 0,
            daily_time_minutes: 0,
            ai_generated: false,
            overview: None,
            strategies: Vec::new(),
            references: Vec::new(),
            created_at,
            updated_at: created_at,
        })
    }
}

impl Snapshot {
    /// Parse snapshot JSON. Only a document that is not a snapshot object at
    /// all is an error; bad records inside it are skipped.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    pub fn into_dataset(self) -> Dataset {
        let brain_types: HashMap<DbId, BrainType> = self
            .users
            .into_iter()
            .filter_map(|user| {
                let raw = user.brain_type?;
                match raw.parse::<BrainType>() {
                    Ok(bt) => Some((user.id, bt)),
                    Err(e) => {
                        tracing::warn!(user_id = user.id, error = %e, "Skipping user with unknown brain type");
                        None
                    }
                }
            })
            .collect();

        let roadmaps = self
            .roadmaps
            .into_iter()
            .filter_map(|roadmap| roadmap.into_roadmap(&brain_types))
            .collect();

        let progress = self
            .progress
            .into_iter()
            .map(|p| ProgressObservation {
                user_id: p.user_id,
                roadmap_id: p.roadmap_id,
                step_number: p.step_number,
                completed: p.completed,
                created_at: parse_optional(p.created_at.as_deref()),
                completed_at: parse_optional(p.completed_at.as_deref()),
            })
            .collect();

        Dataset {
            brain_types,
            roadmaps,
            progress,
        }
    }
}

/// Read and parse a snapshot file.
pub fn load_snapshot(path: &Path) -> anyhow::Result<Dataset> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("reading snapshot {}", path.display()))?;
    let snapshot = Snapshot::from_json_str(&content)
        .with_context(|| format!("parsing snapshot {}", path.display()))?;
    Ok(snapshot.into_dataset())
}

/// Write a snapshot as pretty-printed JSON.
pub fn write_snapshot(path: &Path, snapshot: &Snapshot) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(snapshot).context("serializing snapshot")?;
    std::fs::write(path, json).with_context(|| format!("writing snapshot {}", path.display()))
}
