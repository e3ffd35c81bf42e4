//! Engagement analytics: joins progress with roadmaps and learners,
//! labels each event with its match level and aggregates completion
//! statistics.
//!
//! Everything here is read-only over its inputs. Events that cannot be joined
//! (unknown learner, learner without a brain type, deleted roadmap, step
//! number outside the roadmap) are skipped individually.

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::Serialize;

use crate::brain_type::BrainType;
use crate::classify::MatchLevel;
use crate::config::{AnalysisRequirements, NavigatorConfig};
use crate::preference::normalize_resource_type;
use crate::roadmap::{ProgressRecord, Roadmap};
use crate::types::{DbId, Timestamp};

/// Upper bound of derived time spent, as a multiple of the estimate.
pub const TIME_SPENT_CAP_FACTOR: f64 = 3.0;

/// Lower bound of derived time spent, in minutes.
pub const TIME_SPENT_FLOOR_MINUTES: f64 = 1.0;

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// A progress record as seen by the analysis. Timestamps are optional
/// because exported data may carry missing or unparseable values.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressObservation {
    pub user_id: DbId,
    pub roadmap_id: DbId,
    pub step_number: i32,
    pub completed: bool,
    pub created_at: Option<Timestamp>,
    pub completed_at: Option<Timestamp>,
}

impl From<&ProgressRecord> for ProgressObservation {
    fn from(record: &ProgressRecord) -> Self {
        Self {
            user_id: record.user_id,
            roadmap_id: record.roadmap_id,
            step_number: record.step_number,
            completed: record.completed,
            created_at: Some(record.created_at),
            completed_at: record.completed_at,
        }
    }
}

/// One labelled engagement event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EngagementEvent {
    pub user_id: DbId,
    pub brain_type: BrainType,
    pub roadmap_id: DbId,
    pub roadmap_topic: String,
    pub step_number: i32,
    pub step_title: String,
    pub resource_type: String,
    pub normalized_resource_type: String,
    pub preference_weight: f64,
    pub match_level: MatchLevel,
    pub brain_type_optimized: bool,
    pub completed: bool,
    pub estimated_time_minutes: f64,
    pub time_spent_minutes: Option<f64>,
    pub completion_efficiency: Option<f64>,
}

/// Minutes spent on a step.
///
/// Completed steps with both timestamps use the elapsed time clamped to
/// `[1, estimated * 3]`. Completed steps without usable timestamps fall back
/// to the estimate. Incomplete steps have no time spent.
pub fn time_spent_minutes(
    completed: bool,
    created_at: Option<Timestamp>,
    completed_at: Option<Timestamp>,
    estimated_minutes: f64,
) -> Option<f64> {
    if !completed {
        return None;
    }
    match (created_at, completed_at) {
        (Some(start), Some(end)) => {
            let elapsed = (end - start).num_milliseconds() as f64 / 60_000.0;
            let cap = (estimated_minutes * TIME_SPENT_CAP_FACTOR).max(TIME_SPENT_FLOOR_MINUTES);
            Some(elapsed.clamp(TIME_SPENT_FLOOR_MINUTES, cap))
        }
        _ => Some(estimated_minutes),
    }
}

/// `estimated / actual` for completed events with a positive time spent.
pub fn completion_efficiency(
    completed: bool,
    estimated_minutes: f64,
    time_spent: Option<f64>,
) -> Option<f64> {
    match time_spent {
        Some(actual) if completed && actual > 0.0 => Some(estimated_minutes / actual),
        _ => None,
    }
}

/// Join progress observations with roadmaps and learner brain types.
pub fn build_events(
    config: &NavigatorConfig,
    brain_types: &HashMap<DbId, BrainType>,
    roadmaps: &[Roadmap],
    progress: &[ProgressObservation],
) -> Vec<EngagementEvent> {
    let roadmaps: HashMap<DbId, &Roadmap> = roadmaps.iter().map(|r| (r.id, r)).collect();
    let mut events = Vec::with_capacity(progress.len());
    let mut skipped = 0usize;

    for observation in progress {
        let Some(brain_type) = brain_types.get(&observation.user_id).copied() else {
            skipped += 1;
            continue;
        };
        let Some(roadmap) = roadmaps.get(&observation.roadmap_id) else {
            skipped += 1;
            continue;
        };
        let Some(step) = roadmap.step(observation.step_number) else {
            skipped += 1;
            continue;
        };

        let normalized = normalize_resource_type(config, &step.resource_type);
        let weight = config.weight_of(brain_type, &step.resource_type);
        let estimated = f64::from(step.estimated_time_minutes);
        let time_spent = time_spent_minutes(
            observation.completed,
            observation.created_at,
            observation.completed_at,
            estimated,
        );

        events.push(EngagementEvent {
            user_id: observation.user_id,
            brain_type,
            roadmap_id: roadmap.id,
            roadmap_topic: roadmap.topic.clone(),
            step_number: step.step_number,
            step_title: step.title.clone(),
            resource_type: step.resource_type.clone(),
            normalized_resource_type: normalized,
            preference_weight: weight,
            match_level: MatchLevel::from_weight(weight, &config.thresholds),
            brain_type_optimized: step.brain_type_optimized,
            completed: observation.completed,
            estimated_time_minutes: estimated,
            time_spent_minutes: time_spent,
            completion_efficiency: completion_efficiency(observation.completed, estimated, time_spent),
        });
    }

    if skipped > 0 {
        tracing::debug!(skipped, "Skipped progress records without a join target");
    }
    events
}

/// Whether the events meet the configured minimum users and events.
pub fn has_sufficient_data(requirements: &AnalysisRequirements, events: &[EngagementEvent]) -> bool {
    let users: HashSet<DbId> = events.iter().map(|e| e.user_id).collect();
    users.len() >= requirements.min_users && events.len() >= requirements.min_events
}

// ---------------------------------------------------------------------------
// Statistics
// ---------------------------------------------------------------------------

/// Mean, median and sample standard deviation of a set of values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Distribution {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Absent with fewer than two samples.
    pub std_dev: Option<f64>,
}

impl Distribution {
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);
        let mid = count / 2;
        let median = if count % 2 == 0 {
            (sorted[mid - 1] + sorted[mid]) / 2.0
        } else {
            sorted[mid]
        };

        let std_dev = (count >= 2).then(|| {
            let variance =
                values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            variance.sqrt()
        });

        Some(Self {
            count,
            mean,
            median,
            std_dev,
        })
    }
}

/// Completion and time statistics of one group of events.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupStats {
    pub total: usize,
    pub completed: usize,
    /// `completed / total`, in `[0, 1]`.
    pub completion_rate: f64,
    /// Over completed events with a time spent.
    pub time_spent: Option<Distribution>,
    pub avg_estimated_time: f64,
}

impl GroupStats {
    fn from_events(events: &[&EngagementEvent]) -> Self {
        let total = events.len();
        let completed = events.iter().filter(|e| e.completed).count();
        let times: Vec<f64> = events
            .iter()
            .filter(|e| e.completed)
            .filter_map(|e| e.time_spent_minutes)
            .collect();
        let avg_estimated_time =
            events.iter().map(|e| e.estimated_time_minutes).sum::<f64>() / total as f64;

        Self {
            total,
            completed,
            completion_rate: completed as f64 / total as f64,
            time_spent: Distribution::from_values(&times),
            avg_estimated_time,
        }
    }
}

/// Group events by `key`. Only non-empty groups are produced.
pub fn group_stats<K, F>(events: &[EngagementEvent], key: F) -> BTreeMap<K, GroupStats>
where
    K: Ord,
    F: Fn(&EngagementEvent) -> K,
{
    let mut groups: BTreeMap<K, Vec<&EngagementEvent>> = BTreeMap::new();
    for event in events {
        groups.entry(key(event)).or_default().push(event);
    }
    groups
        .into_iter()
        .map(|(k, members)| (k, GroupStats::from_events(&members)))
        .collect()
}

/// Relative completion-rate gain of high over low matches, in percent.
///
/// Absent unless both rates exist and the low rate is positive.
pub fn improvement_percentage(high_rate: Option<f64>, low_rate: Option<f64>) -> Option<f64> {
    match (high_rate, low_rate) {
        (Some(high), Some(low)) if low > 0.0 => Some((high - low) / low * 100.0),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Overview {
    pub total_events: usize,
    pub completed_events: usize,
    pub unique_users: usize,
    pub unique_roadmaps: usize,
    pub overall_completion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrossGroup {
    pub brain_type: BrainType,
    pub match_level: MatchLevel,
    pub stats: GroupStats,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub overview: Overview,
    pub by_match_level: BTreeMap<MatchLevel, GroupStats>,
    pub by_brain_type: BTreeMap<BrainType, GroupStats>,
    pub by_resource_type: BTreeMap<String, GroupStats>,
    pub by_topic: BTreeMap<String, GroupStats>,
    pub by_brain_type_and_match: Vec<CrossGroup>,
    /// Completion efficiency of completed events per match level.
    pub efficiency_by_match_level: BTreeMap<MatchLevel, Distribution>,
    pub improvement_percentage: Option<f64>,
}

impl AnalysisReport {
    pub fn from_events(events: &[EngagementEvent]) -> Self {
        let completed_events = events.iter().filter(|e| e.completed).count();
        let unique_users = events.iter().map(|e| e.user_id).collect::<HashSet<_>>().len();
        let unique_roadmaps = events.iter().map(|e| e.roadmap_id).collect::<HashSet<_>>().len();
        let overall_completion_rate = if events.is_empty() {
            0.0
        } else {
            completed_events as f64 / events.len() as f64
        };

        let by_match_level = group_stats(events, |e| e.match_level);
        let improvement = improvement_percentage(
            by_match_level.get(&MatchLevel::HighMatch).map(|s| s.completion_rate),
            by_match_level.get(&MatchLevel::LowMatch).map(|s| s.completion_rate),
        );

        let by_brain_type_and_match = group_stats(events, |e| (e.brain_type, e.match_level))
            .into_iter()
            .map(|((brain_type, match_level), stats)| CrossGroup {
                brain_type,
                match_level,
                stats,
            })
            .collect();

        let mut efficiencies: BTreeMap<MatchLevel, Vec<f64>> = BTreeMap::new();
        for event in events {
            if let Some(efficiency) = event.completion_efficiency {
                efficiencies.entry(event.match_level).or_default().push(efficiency);
            }
        }
        let efficiency_by_match_level = efficiencies
            .into_iter()
            .filter_map(|(level, values)| Distribution::from_values(&values).map(|d| (level, d)))
            .collect();

        Self {
            overview: Overview {
                total_events: events.len(),
                completed_events,
                unique_users,
                unique_roadmaps,
                overall_completion_rate,
            },
            by_match_level,
            by_brain_type: group_stats(events, |e| e.brain_type),
            by_resource_type: group_stats(events, |e| e.normalized_resource_type.clone()),
            by_topic: group_stats(events, |e| e.roadmap_topic.clone()),
            by_brain_type_and_match,
            efficiency_by_match_level,
            improvement_percentage: improvement,
        }
    }

    /// Human-readable findings, one line each.
    pub fn insights(&self) -> Vec<String> {
        let mut lines = Vec::new();
        let o = &self.overview;
        lines.push(format!(
            "Analyzed {} engagement events from {} users across {} roadmaps.",
            o.total_events, o.unique_users, o.unique_roadmaps
        ));
        lines.push(format!(
            "Overall completion rate: {:.1}% ({} of {} steps).",
            o.overall_completion_rate * 100.0,
            o.completed_events,
            o.total_events
        ));

        for level in MatchLevel::ALL {
            if let Some(stats) = self.by_match_level.get(&level) {
                lines.push(format!(
                    "{level}: {:.1}% completion over {} events.",
                    stats.completion_rate * 100.0,
                    stats.total
                ));
            }
        }

        match self.improvement_percentage {
            Some(pct) if pct >= 0.0 => lines.push(format!(
                "High-match resources complete {pct:.1}% more often than low-match resources."
            )),
            Some(pct) => lines.push(format!(
                "High-match resources complete {:.1}% less often than low-match resources.",
                pct.abs()
            )),
            None => lines.push(
                "Improvement of high over low matches cannot be computed from this data."
                    .to_string(),
            ),
        }

        if let Some((brain_type, stats)) = self
            .by_brain_type
            .iter()
            .max_by(|a, b| a.1.completion_rate.total_cmp(&b.1.completion_rate))
        {
            lines.push(format!(
                "Best performing brain type: {brain_type} ({:.1}% completion).",
                stats.completion_rate * 100.0
            ));
        }

        for level in MatchLevel::ALL {
            if let Some(d) = self.efficiency_by_match_level.get(&level) {
                lines.push(format!(
                    "{level} completion efficiency: mean {:.2}, median {:.2} (n={}).",
                    d.mean, d.median, d.count
                ));
            }
        }
        lines
    }
}
