//! Offline engagement analysis.
//!
//! Loads users, roadmaps and progress from Postgres or a JSON snapshot,
//! joins them into engagement events and summarizes how the brain-type to
//! resource-type match level relates to completion. [`generate`] writes
//! synthetic snapshots for trying the report without real learners.

pub mod dataset;
pub mod generate;
pub mod snapshot;

use neuronav_core::analytics::{build_events, has_sufficient_data, AnalysisReport};
use neuronav_core::config::NavigatorConfig;

pub use dataset::Dataset;

/// Result of one analysis pass.
#[derive(Debug)]
pub enum Analysis {
    /// Too little data to report on. Not an error.
    Insufficient { users: usize, events: usize },
    Report(AnalysisReport),
}

/// Join the dataset into events and summarize them.
pub fn analyze(config: &NavigatorConfig, dataset: &Dataset) -> Analysis {
    let events = build_events(
        config,
        &dataset.brain_types,
        &dataset.roadmaps,
        &dataset.progress,
    );
    tracing::info!(
        users = dataset.brain_types.len(),
        roadmaps = dataset.roadmaps.len(),
        progress = dataset.progress.len(),
        events = events.len(),
        "Built engagement events"
    );

    if !has_sufficient_data(&config.analysis, &events) {
        let users = events
            .iter()
            .map(|e| e.user_id)
            .collect::<std::collections::HashSet<_>>()
            .len();
        return Analysis::Insufficient {
            users,
            events: events.len(),
        };
    }
    Analysis::Report(AnalysisReport::from_events(&events))
}

/// Render a report as the plain-text summary printed by the CLI.
pub fn render_text(report: &AnalysisReport) -> String {
    let mut out = String::from("NeuroNav engagement analysis\n============================\n\n");
    for line in report.insights() {
        out.push_str("- ");
        out.push_str(&line);
        out.push('\n');
    }

    if !report.by_resource_type.is_empty() {
        out.push_str("\nCompletion by resource type:\n");
        for (resource_type, stats) in &report.by_resource_type {
            out.push_str(&format!(
                "  {resource_type:<16} {:>5.1}%  ({}/{})\n",
                stats.completion_rate * 100.0,
                stats.completed,
                stats.total
            ));
        }
    }

    if !report.by_brain_type_and_match.is_empty() {
        out.push_str("\nCompletion by brain type and match level:\n");
        for group in &report.by_brain_type_and_match {
            out.push_str(&format!(
                "  {:<12} {:<13} {:>5.1}%  ({}/{})\n",
                group.brain_type.as_str(),
                group.match_level.as_str(),
                group.stats.completion_rate * 100.0,
                group.stats.completed,
                group.stats.total
            ));
        }
    }
    out
}
