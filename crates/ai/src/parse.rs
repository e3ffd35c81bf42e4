//! Interpretation of model output as a roadmap draft.
//!
//! The model is asked for JSON with `overview`, `strategies`, `resources`,
//! `timeline` and `references`. Anything that does not parse as a JSON
//! object still produces a usable single-step draft.

use std::sync::LazyLock;

use neuronav_core::brain_type::BrainType;
use neuronav_core::generation::AuthoredRoadmap;
use neuronav_core::roadmap::Step;
use regex::Regex;
use serde_json::{Map, Value};

pub const AI_RESOURCE_TYPE: &str = "ai_generated";
pub const AI_STEP_MINUTES: i32 = 60;
pub const DEFAULT_WEEKS: i32 = 8;
pub const DEFAULT_DAILY_MINUTES: i32 = 60;
pub const FALLBACK_WEEKS: i32 = 6;
pub const MAX_RESOURCE_STEPS: usize = 10;

/// Phases emitted first, in this order. Others follow alphabetically.
const PHASE_ORDER: [&str; 3] = ["beginner", "intermediate", "advanced"];

static WEEKS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*weeks?").expect("valid regex"));

static DAILY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)(\d+)\s*(?:minutes?|hrs?|hours?)").expect("valid regex"));

/// Turn raw assistant content into a draft for `topic`.
pub fn parse_roadmap_content(content: &str, topic: &str, brain_type: BrainType) -> AuthoredRoadmap {
    let body = strip_code_fences(content);
    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(data)) => from_json(&data, topic, brain_type),
        Ok(_) | Err(_) => {
            tracing::warn!(%topic, "AI response was not a JSON object, using fallback draft");
            fallback(topic, brain_type)
        }
    }
}

/// Remove a surrounding Markdown code fence (with or without a language tag).
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = match rest.find('\n') {
        Some(newline) => &rest[newline + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

fn from_json(data: &Map<String, Value>, topic: &str, brain_type: BrainType) -> AuthoredRoadmap {
    let timeline = data.get("timeline").cloned().unwrap_or(Value::Null);
    let timeline_text = match &timeline {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };

    let mut steps = phase_steps(&timeline);
    if steps.is_empty() {
        steps = resource_steps(data.get("resources"));
    }

    let overview = data
        .get("overview")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| format!("Personalized {topic} learning path for {brain_type} learners"));

    AuthoredRoadmap {
        steps,
        estimated_completion_weeks: extract_weeks(&timeline_text),
        daily_time_minutes: extract_daily_minutes(&timeline_text),
        overview: Some(overview),
        strategies: string_list(data.get("strategies")),
        references: string_list(data.get("references")),
    }
}

fn phase_steps(timeline: &Value) -> Vec<Step> {
    let Some(phases) = timeline
        .get("phased_roadmap")
        .or_else(|| timeline.get("phases"))
        .and_then(Value::as_object)
    else {
        return Vec::new();
    };

    let mut names: Vec<&String> = phases.keys().collect();
    names.sort_by_key(|name| {
        let rank = PHASE_ORDER
            .iter()
            .position(|p| p.eq_ignore_ascii_case(name))
            .unwrap_or(PHASE_ORDER.len());
        (rank, name.to_lowercase())
    });

    let mut steps = Vec::new();
    for name in names {
        let Some(items) = phases.get(name).and_then(Value::as_array) else {
            continue;
        };
        let label = title_case(name);
        for item in items {
            let step_number = steps.len() as i32 + 1;
            let (title, description) = match item.as_str() {
                Some(text) => (format!("{label}: {text}"), text.to_string()),
                None => (
                    format!("{label} Step {step_number}"),
                    format!("Complete {name} level activities"),
                ),
            };
            steps.push(ai_step(step_number, title, description, Some(name.clone())));
        }
    }
    steps
}

fn resource_steps(resources: Option<&Value>) -> Vec<Step> {
    let Some(resources) = resources.and_then(Value::as_array) else {
        return Vec::new();
    };
    resources
        .iter()
        .take(MAX_RESOURCE_STEPS)
        .zip(1..)
        .map(|(resource, step_number)| match resource.as_str() {
            Some(text) => ai_step(
                step_number,
                format!("Step {step_number}: {text}"),
                text.to_string(),
                None,
            ),
            None => ai_step(
                step_number,
                format!("Learning Step {step_number}"),
                "AI-generated learning activity".to_string(),
                None,
            ),
        })
        .collect()
}

fn ai_step(step_number: i32, title: String, description: String, phase: Option<String>) -> Step {
    Step {
        step_number,
        title,
        description,
        resource_id: None,
        resource_type: AI_RESOURCE_TYPE.to_string(),
        resource_url: None,
        estimated_time_minutes: AI_STEP_MINUTES,
        tags: Vec::new(),
        brain_type_optimized: true,
        phase,
    }
}

/// First positive `N week(s)` in the timeline text, else [`DEFAULT_WEEKS`].
pub fn extract_weeks(timeline: &str) -> i32 {
    WEEKS_RE
        .captures(timeline)
        .and_then(|c| c[1].parse::<i32>().ok())
        .filter(|weeks| *weeks > 0)
        .unwrap_or(DEFAULT_WEEKS)
}

/// First `N minutes` / `N hours` / `N hrs` in the timeline text, converted
/// to minutes.
pub fn extract_daily_minutes(timeline: &str) -> i32 {
    let Some(captures) = DAILY_RE.captures(timeline) else {
        return DEFAULT_DAILY_MINUTES;
    };
    let Ok(value) = captures[1].parse::<i32>() else {
        return DEFAULT_DAILY_MINUTES;
    };
    let minutes = if captures[0].to_lowercase().contains('h') {
        value.saturating_mul(60)
    } else {
        value
    };
    if minutes > 0 {
        minutes
    } else {
        DEFAULT_DAILY_MINUTES
    }
}

/// Strings are kept as-is; other JSON values are rendered compactly.
fn string_list(value: Option<&Value>) -> Vec<String> {
    match value {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(s)) => vec![s.clone()],
        _ => Vec::new(),
    }
}

fn title_case(name: &str) -> String {
    name.split(|c: char| c == '_' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

fn fallback(topic: &str, brain_type: BrainType) -> AuthoredRoadmap {
    AuthoredRoadmap {
        steps: vec![ai_step(
            1,
            format!("Introduction to {topic}"),
            format!("Begin your {topic} learning journey with {brain_type}-optimized approaches"),
            None,
        )],
        estimated_completion_weeks: FALLBACK_WEEKS,
        daily_time_minutes: DEFAULT_DAILY_MINUTES,
        overview: Some(format!(
            "AI-generated learning path for {topic} optimized for {brain_type} learners"
        )),
        strategies: vec![
            format!("Utilize {brain_type}-specific learning methods"),
            "Practice regularly".to_string(),
            "Seek feedback".to_string(),
        ],
        references: vec!["AI response could not be parsed properly".to_string()],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PHASED: &str = r#"{
        "overview": "Learn Rust by building",
        "strategies": ["Build small tools", "Pair program"],
        "resources": ["The Book"],
        "timeline": {
            "phased_roadmap": {
                "advanced": ["Async runtimes"],
                "beginner": ["Ownership", "Borrowing"],
                "capstone": ["Ship a CLI"],
                "intermediate": [{"topic": "Traits"}]
            },
            "week_by_week": {"week_1": "Spend 45 minutes a day over 10 weeks"}
        },
        "references": ["https://doc.rust-lang.org/book/"]
    }"#;

    #[test]
    fn phases_are_ordered_and_numbered() {
        let draft = parse_roadmap_content(PHASED, "Rust", BrainType::Kinesthetic);
        let titles: Vec<&str> = draft.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "Beginner: Ownership",
                "Beginner: Borrowing",
                "Intermediate Step 3",
                "Advanced: Async runtimes",
                "Capstone: Ship a CLI",
            ]
        );
        let numbers: Vec<i32> = draft.steps.iter().map(|s| s.step_number).collect();
        assert_eq!(numbers, [1, 2, 3, 4, 5]);
        assert_eq!(draft.steps[2].description, "Complete intermediate level activities");
        assert_eq!(draft.steps[0].phase.as_deref(), Some("beginner"));
        assert!(draft.steps.iter().all(|s| s.resource_type == AI_RESOURCE_TYPE));
        assert!(draft.steps.iter().all(|s| s.estimated_time_minutes == 60));
    }

    #[test]
    fn schedule_is_read_from_timeline_text() {
        let draft = parse_roadmap_content(PHASED, "Rust", BrainType::Visual);
        assert_eq!(draft.estimated_completion_weeks, 10);
        assert_eq!(draft.daily_time_minutes, 45);
        assert_eq!(draft.overview.as_deref(), Some("Learn Rust by building"));
        assert_eq!(draft.strategies.len(), 2);
        assert_eq!(draft.references, ["https://doc.rust-lang.org/book/"]);
    }

    #[test]
    fn resources_used_when_no_phases() {
        let content = r#"{"resources": ["Rustlings", 42, "Exercism"], "timeline": "about 2 hours daily"}"#;
        let draft = parse_roadmap_content(content, "Rust", BrainType::ReadWrite);
        let titles: Vec<&str> = draft.steps.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["Step 1: Rustlings", "Learning Step 2", "Step 3: Exercism"]);
        assert_eq!(draft.steps[1].description, "AI-generated learning activity");
        assert_eq!(draft.estimated_completion_weeks, DEFAULT_WEEKS);
        assert_eq!(draft.daily_time_minutes, 120);
        assert_eq!(
            draft.overview.as_deref(),
            Some("Personalized Rust learning path for ReadWrite learners")
        );
    }

    #[test]
    fn resource_steps_are_capped() {
        let resources: Vec<String> = (0..15).map(|i| format!("\"r{i}\"")).collect();
        let content = format!("{{\"resources\": [{}]}}", resources.join(","));
        let draft = parse_roadmap_content(&content, "Go", BrainType::Auditory);
        assert_eq!(draft.steps.len(), MAX_RESOURCE_STEPS);
    }

    #[test]
    fn fenced_json_is_accepted() {
        let content = "```json\n{\"overview\": \"fenced\", \"resources\": [\"a\"]}\n```";
        let draft = parse_roadmap_content(content, "Go", BrainType::Auditory);
        assert_eq!(draft.overview.as_deref(), Some("fenced"));
        assert_eq!(draft.steps.len(), 1);
    }

    #[test]
    fn prose_yields_fallback_draft() {
        let draft = parse_roadmap_content("Sure! Here is a plan...", "Design", BrainType::Visual);
        assert_eq!(draft.steps.len(), 1);
        assert_eq!(draft.steps[0].title, "Introduction to Design");
        assert_eq!(
            draft.steps[0].description,
            "Begin your Design learning journey with Visual-optimized approaches"
        );
        assert_eq!(draft.estimated_completion_weeks, FALLBACK_WEEKS);
        assert_eq!(draft.strategies[0], "Utilize Visual-specific learning methods");
        assert_eq!(draft.references, ["AI response could not be parsed properly"]);
    }

    #[test]
    fn json_array_yields_fallback_draft() {
        let draft = parse_roadmap_content("[1, 2]", "Design", BrainType::Visual);
        assert_eq!(draft.steps[0].title, "Introduction to Design");
    }

    #[test]
    fn extractors_default_on_missing_or_zero() {
        assert_eq!(extract_weeks("self paced"), DEFAULT_WEEKS);
        assert_eq!(extract_weeks("0 weeks"), DEFAULT_WEEKS);
        assert_eq!(extract_weeks("3 Weeks of practice"), 3);
        assert_eq!(extract_daily_minutes("no schedule"), DEFAULT_DAILY_MINUTES);
        assert_eq!(extract_daily_minutes("1 hr per day"), 60);
        assert_eq!(extract_daily_minutes("30 Minutes"), 30);
        assert_eq!(extract_daily_minutes("1 hour per day"), 60);
    }

    #[test]
    fn strip_fences_without_language_tag() {
        assert_eq!(strip_code_fences("```\n{}\n```"), "{}");
        assert_eq!(strip_code_fences("  {}  "), "{}");
    }
}
