//! Resource ranker: orders catalog resources by brain-type preference and
//! turns the best of them into roadmap steps.

use crate::brain_type::BrainType;
use crate::config::NavigatorConfig;
use crate::roadmap::{Resource, Step, DEFAULT_STEP_MINUTES, PLACEHOLDER_DESCRIPTION};

/// Join a base description and a study tip with a single space, falling back
/// to whichever is non-empty, then to [`PLACEHOLDER_DESCRIPTION`].
pub fn compose_description(base: Option<&str>, tip: &str) -> String {
    let base = base.map(str::trim).unwrap_or_default();
    let tip = tip.trim();
    match (base.is_empty(), tip.is_empty()) {
        (false, false) => format!("{base} {tip}"),
        (false, true) => base.to_string(),
        (true, false) => tip.to_string(),
        (true, true) => PLACEHOLDER_DESCRIPTION.to_string(),
    }
}

/// Score every resource, stable-sort by score descending, keep at most the
/// intensity's step budget and number the survivors from 1.
///
/// Pairs missing from the preference table score
/// `config.ranking_fallback_weight`. Equal scores keep their input order.
/// An empty input produces an empty roadmap.
pub fn rank_and_select(
    config: &NavigatorConfig,
    resources: &[Resource],
    brain_type: BrainType,
    intensity: &str,
) -> Vec<Step> {
    let mut scored: Vec<(f64, &Resource)> = resources
        .iter()
        .map(|r| (config.ranking_weight_of(brain_type, &r.resource_type), r))
        .collect();

    // `sort_by` is stable, which keeps ties in catalog order.
    scored.sort_by(|a, b| b.0.total_cmp(&a.0));
    scored.truncate(config.step_budget(intensity));

    let tip = brain_type.study_tip();
    scored
        .into_iter()
        .enumerate()
        .map(|(index, (_, resource))| {
            let step_number = index as i32 + 1;
            let title = if resource.title.trim().is_empty() {
                format!("Learning Step {step_number}")
            } else {
                resource.title.clone()
            };
            Step {
                step_number,
                title,
                description: compose_description(resource.description.as_deref(), tip),
                resource_id: Some(resource.id),
                resource_type: resource.resource_type.clone(),
                resource_url: resource.url.clone(),
                estimated_time_minutes: resource
                    .estimated_time_minutes
                    .unwrap_or(DEFAULT_STEP_MINUTES),
                tags: resource.tags.clone(),
                brain_type_optimized: true,
                phase: None,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resource(id: i64, resource_type: &str, minutes: i32) -> Resource {
        Resource {
            id,
            title: format!("Resource {id}"),
            description: Some(format!("About resource {id}.")),
            resource_type: resource_type.to_string(),
            url: Some(format!("https://example.com/{id}")),
            estimated_time_minutes: Some(minutes),
            tags: vec!["python".into()],
        }
    }

    #[test]
    fn visual_beginner_orders_by_preference() {
        let config = NavigatorConfig::default();
        let resources = vec![
            resource(1, "video", 10),
            resource(2, "article", 20),
            resource(3, "tutorial", 15),
        ];
        let steps = rank_and_select(&config, &resources, BrainType::Visual, "beginner");

        let types: Vec<&str> = steps.iter().map(|s| s.resource_type.as_str()).collect();
        assert_eq!(types, ["video", "tutorial", "article"]);
        let numbers: Vec<i32> = steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, [1, 2, 3]);
        assert_eq!(steps[1].estimated_time_minutes, 15);
        assert!(steps.iter().all(|s| s.brain_type_optimized));
    }

    #[test]
    fn output_length_is_min_of_input_and_budget() {
        let config = NavigatorConfig::default();
        let resources: Vec<Resource> = (1..=20).map(|i| resource(i, "video", 10)).collect();
        for (intensity, budget) in [("beginner", 6), ("intermediate", 8), ("advanced", 10), ("expert", 8)] {
            for n in [0usize, 3, 6, 9, 20] {
                let steps = rank_and_select(&config, &resources[..n], BrainType::Auditory, intensity);
                assert_eq!(steps.len(), n.min(budget), "{intensity} with {n} resources");
            }
        }
    }

    #[test]
    fn ties_keep_input_order() {
        let config = NavigatorConfig::default();
        let resources = vec![
            resource(10, "documentation", 10),
            resource(11, "article", 10),
            resource(12, "reference", 10),
            resource(13, "book", 10),
        ];
        // article and book both normalize to article (0.1 for Auditory),
        // documentation and reference fall back to 0.1 as well.
        let steps = rank_and_select(&config, &resources, BrainType::Auditory, "advanced");
        let ids: Vec<Option<i64>> = steps.iter().map(|s| s.resource_id).collect();
        assert_eq!(ids, [Some(10), Some(11), Some(12), Some(13)]);
    }

    #[test]
    fn unweighted_type_uses_fallback_score() {
        let config = NavigatorConfig::default();
        // Kinesthetic: article is unweighted (0.1 fallback), video is 0.1, course 0.2.
        let resources = vec![
            resource(1, "article", 10),
            resource(2, "course", 10),
            resource(3, "video", 10),
        ];
        let steps = rank_and_select(&config, &resources, BrainType::Kinesthetic, "beginner");
        let ids: Vec<Option<i64>> = steps.iter().map(|s| s.resource_id).collect();
        assert_eq!(ids, [Some(2), Some(1), Some(3)]);
    }

    #[test]
    fn description_gets_brain_type_tip() {
        let config = NavigatorConfig::default();
        let steps = rank_and_select(&config, &[resource(1, "video", 5)], BrainType::Visual, "beginner");
        assert_eq!(
            steps[0].description,
            "About resource 1. Focus on visual elements, diagrams, and interactive demonstrations."
        );
    }

    #[test]
    fn missing_title_and_estimate_get_defaults() {
        let config = NavigatorConfig::default();
        let mut r = resource(1, "video", 5);
        r.title = String::new();
        r.estimated_time_minutes = None;
        let steps = rank_and_select(&config, &[r], BrainType::Visual, "beginner");
        assert_eq!(steps[0].title, "Learning Step 1");
        assert_eq!(steps[0].estimated_time_minutes, 60);
    }

    #[test]
    fn compose_description_fallbacks() {
        assert_eq!(compose_description(Some("Base."), "Tip."), "Base. Tip.");
        assert_eq!(compose_description(Some("Base."), ""), "Base.");
        assert_eq!(compose_description(None, "Tip."), "Tip.");
        assert_eq!(compose_description(Some("  "), ""), PLACEHOLDER_DESCRIPTION);
    }

    #[test]
    fn empty_input_gives_empty_roadmap() {
        let config = NavigatorConfig::default();
        assert!(rank_and_select(&config, &[], BrainType::ReadWrite, "beginner").is_empty());
    }
}
