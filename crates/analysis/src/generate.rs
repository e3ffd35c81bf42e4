//! Synthetic engagement data for exercising the analysis without real
//! learners.
//!
//! Five learners each follow one or two of three fixed four-step roadmaps.
//! Steps whose resource type is a high match for the learner are completed
//! more often (around 85% against 45%) and faster (80-110% of the estimate
//! against 100-140%). The result is written in the snapshot format so it
//! can be fed straight back into `analyze --snapshot`.

use chrono::{Duration, SecondsFormat};
use neuronav_core::brain_type::BrainType;
use neuronav_core::classify::{classify, MatchLevel};
use neuronav_core::config::NavigatorConfig;
use neuronav_core::types::{DbId, Timestamp};
use rand::seq::SliceRandom;
use rand::Rng;

use crate::snapshot::{Snapshot, SnapshotProgress, SnapshotRoadmap, SnapshotStep, SnapshotUser};

const LEARNERS: [(&str, BrainType); 5] = [
    ("Alice Johnson", BrainType::Visual),
    ("Bob Smith", BrainType::Auditory),
    ("Carol Davis", BrainType::ReadWrite),
    ("David Wilson", BrainType::Kinesthetic),
    ("Eva Brown", BrainType::Visual),
];

/// Topic and its steps as (title, resource type, minutes).
const ROADMAPS: [(&str, [(&str, &str, i32); 4]); 3] = [
    (
        "Data Science Fundamentals",
        [
            ("Introduction to Data Science", "video", 45),
            ("Python for Data Analysis", "tutorial", 90),
            ("Data Visualization", "article", 60),
            ("Statistical Analysis", "course", 120),
        ],
    ),
    (
        "Web Development Basics",
        [
            ("HTML Fundamentals", "course", 60),
            ("CSS Styling", "video", 75),
            ("JavaScript Basics", "tutorial", 120),
            ("Responsive Design", "article", 45),
        ],
    ),
    (
        "Machine Learning Introduction",
        [
            ("ML Theory Overview", "article", 90),
            ("Linear Regression", "tutorial", 120),
            ("Model Evaluation", "video", 45),
            ("Practical Project", "exercise", 180),
        ],
    ),
];

/// Roadmap ids start here so they never collide with learner ids.
const FIRST_ROADMAP_ID: DbId = 100;

const OPTIMIZED_COMPLETION: f64 = 0.85;
const OTHER_COMPLETION: f64 = 0.45;
const COMPLETION_JITTER: f64 = 0.1;

fn timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Build a snapshot of learners, roadmaps and step progress ending at `now`.
pub fn generate_snapshot<R: Rng + ?Sized>(
    config: &NavigatorConfig,
    rng: &mut R,
    now: Timestamp,
) -> Snapshot {
    let mut snapshot = Snapshot::default();
    let mut next_roadmap_id = FIRST_ROADMAP_ID;

    for (user_id, (name, brain_type)) in (1..).zip(LEARNERS) {
        snapshot.users.push(SnapshotUser {
            id: user_id,
            brain_type: Some(brain_type.to_string()),
        });

        let mut picks: Vec<usize> = (0..ROADMAPS.len()).collect();
        picks.shuffle(rng);
        let count = rng.random_range(1..=2);

        for &pick in picks.iter().take(count) {
            let (topic, templates) = ROADMAPS[pick];
            let roadmap_id = next_roadmap_id;
            next_roadmap_id += 1;

            let started = now - Duration::days(rng.random_range(1..=30));
            let tag = topic
                .split_whitespace()
                .next()
                .unwrap_or(topic)
                .to_lowercase();

            let mut steps = Vec::with_capacity(templates.len());
            for (index, (title, resource_type, minutes)) in (0..).zip(templates) {
                let optimized = classify(config, brain_type, resource_type) == MatchLevel::HighMatch;
                let step_number = index + 1;
                steps.push(SnapshotStep {
                    step_number,
                    title: title.to_string(),
                    description: format!(
                        "Learn about {} through {resource_type} content",
                        title.to_lowercase()
                    ),
                    resource_type: resource_type.to_string(),
                    estimated_time_minutes: f64::from(minutes),
                    tags: vec![tag.clone()],
                    brain_type_optimized: optimized,
                });

                let base = if optimized {
                    OPTIMIZED_COMPLETION
                } else {
                    OTHER_COMPLETION
                };
                let probability = (base + rng.random_range(-COMPLETION_JITTER..=COMPLETION_JITTER))
                    .clamp(0.1, 0.95);
                let completed = rng.random_bool(probability);

                let opened = started
                    + Duration::days(i64::from(index))
                    + Duration::minutes(rng.random_range(0..=1440));
                let completed_at = completed.then(|| {
                    let factor = if optimized {
                        rng.random_range(0.8..=1.1)
                    } else {
                        rng.random_range(1.0..=1.4)
                    };
                    let seconds = (f64::from(minutes) * factor * 60.0).round() as i64;
                    timestamp(opened + Duration::seconds(seconds))
                });

                snapshot.progress.push(SnapshotProgress {
                    user_id,
                    roadmap_id,
                    step_number,
                    completed,
                    created_at: Some(timestamp(opened)),
                    completed_at,
                });
            }

            tracing::debug!(learner = name, %brain_type, topic, roadmap_id, "Generated roadmap");
            snapshot.roadmaps.push(SnapshotRoadmap {
                id: roadmap_id,
                user_id,
                topic: topic.to_string(),
                brain_type: Some(brain_type.to_string()),
                intensity: None,
                steps,
                created_at: Some(timestamp(started)),
            });
        }
    }

    tracing::info!(
        users = snapshot.users.len(),
        roadmaps = snapshot.roadmaps.len(),
        progress = snapshot.progress.len(),
        "Generated synthetic snapshot"
    );
    snapshot
}
