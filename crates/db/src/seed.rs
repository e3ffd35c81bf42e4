//! Starter data: the resource catalog and the VARK question bank.
//!
//! The catalog holds fifteen curated entries covering data science, web
//! development and machine learning. Both are loaded into empty tables on
//! startup and used directly by the in-memory store.

use neuronav_core::assessment::default_questions;
use neuronav_core::roadmap::Resource;

use crate::models::resource::CreateResource;
use crate::repositories::{QuizQuestionRepo, ResourceRepo};
use crate::DbPool;

/// (title, type, minutes, url, tags)
const CATALOG: &[(&str, &str, i32, &str, &[&str])] = &[
    (
        "Python for Data Science Handbook",
        "article",
        480,
        "https://jakevdp.github.io/PythonDataScienceHandbook/",
        &["Data Science", "Python", "Pandas", "NumPy"],
    ),
    (
        "Kaggle Learn: Data Science Micro-Courses",
        "course",
        300,
        "https://www.kaggle.com/learn",
        &["Data Science", "Machine Learning", "Python"],
    ),
    (
        "StatQuest with Josh Starmer",
        "video",
        600,
        "https://www.youtube.com/c/joshstarmer",
        &["Data Science", "Statistics", "Machine Learning"],
    ),
    (
        "Hands-On Machine Learning (2nd Edition)",
        "book",
        1200,
        "https://www.oreilly.com/library/view/hands-on-machine-learning/9781492032632/",
        &["Machine Learning", "Python", "Scikit-learn", "TensorFlow"],
    ),
    (
        "Data Science Cheat Sheets",
        "reference",
        30,
        "https://www.datacamp.com/cheat-sheet",
        &["Data Science", "Python", "R", "SQL"],
    ),
    (
        "MDN Web Docs - JavaScript Guide",
        "documentation",
        360,
        "https://developer.mozilla.org/en-US/docs/Web/JavaScript/Guide",
        &["Web Development", "JavaScript", "Frontend"],
    ),
    (
        "React Official Tutorial",
        "tutorial",
        240,
        "https://react.dev/learn",
        &["Web Development", "React", "Frontend", "JavaScript"],
    ),
    (
        "The Odin Project - Full Stack JavaScript",
        "course",
        2400,
        "https://www.theodinproject.com/paths/full-stack-javascript",
        &["Web Development", "JavaScript", "Full Stack", "Node.js"],
    ),
    (
        "CSS-Tricks - A Complete Guide to Flexbox",
        "article",
        60,
        "https://css-tricks.com/snippets/css/a-guide-to-flexbox/",
        &["Web Development", "CSS", "Frontend", "Layout"],
    ),
    (
        "Traversy Media - Web Development Crash Courses",
        "video",
        720,
        "https://www.youtube.com/c/TraversyMedia",
        &["Web Development", "JavaScript", "Python", "PHP"],
    ),
    (
        "Andrew Ng's Machine Learning Course",
        "course",
        660,
        "https://www.coursera.org/learn/machine-learning",
        &["Machine Learning", "Mathematics", "Algorithms"],
    ),
    (
        "Fast.ai Practical Deep Learning",
        "course",
        840,
        "https://course.fast.ai/",
        &["Machine Learning", "Deep Learning", "Python", "PyTorch"],
    ),
    (
        "Scikit-learn User Guide",
        "documentation",
        300,
        "https://scikit-learn.org/stable/user_guide.html",
        &["Machine Learning", "Python", "Scikit-learn"],
    ),
    (
        "3Blue1Brown - Neural Networks Series",
        "video",
        180,
        "https://www.youtube.com/playlist?list=PLZHQObOWTQDNU6R1_67000Dx_ZCJB-3pi",
        &["Machine Learning", "Deep Learning", "Neural Networks", "Mathematics"],
    ),
    (
        "Papers With Code - Latest ML Research",
        "reference",
        120,
        "https://paperswithcode.com/",
        &["Machine Learning", "Research", "Deep Learning", "AI"],
    ),
];

/// The starter catalog with ids assigned in catalog order, starting at 1.
pub fn default_resources() -> Vec<Resource> {
    CATALOG
        .iter()
        .zip(1..)
        .map(|(&(title, resource_type, minutes, url, tags), id)| Resource {
            id,
            title: title.to_string(),
            description: None,
            resource_type: resource_type.to_string(),
            url: Some(url.to_string()),
            estimated_time_minutes: Some(minutes),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .collect()
}

/// Insert the starter catalog if the table is empty. Returns how many rows
/// were inserted.
pub async fn seed_resources_if_empty(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let existing = ResourceRepo::count(pool).await?;
    if existing > 0 {
        tracing::debug!(existing, "Resource catalog already populated, skipping seed");
        return Ok(0);
    }

    let resources = default_resources();
    for resource in &resources {
        ResourceRepo::create(pool, &CreateResource::from(resource)).await?;
    }
    tracing::info!(count = resources.len(), "Seeded resource catalog");
    Ok(resources.len())
}

/// Insert the built-in question bank if the table is empty. Returns how
/// many questions were inserted.
pub async fn seed_questions_if_empty(pool: &DbPool) -> Result<usize, sqlx::Error> {
    let existing = QuizQuestionRepo::count(pool).await?;
    if existing > 0 {
        tracing::debug!(existing, "Question bank already populated, skipping seed");
        return Ok(0);
    }

    let questions = default_questions();
    for question in &questions {
        QuizQuestionRepo::create(pool, question).await?;
    }
    tracing::info!(count = questions.len(), "Seeded quiz question bank");
    Ok(questions.len())
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn catalog_has_fifteen_unique_entries() {
        let resources = default_resources();
        assert_eq!(resources.len(), 15);
        let titles: HashSet<_> = resources.iter().map(|r| r.title.as_str()).collect();
        assert_eq!(titles.len(), 15);
        assert_eq!(resources.first().map(|r| r.id), Some(1));
        assert_eq!(resources.last().map(|r| r.id), Some(15));
    }

    #[test]
    fn every_entry_has_url_tags_and_estimate() {
        for resource in default_resources() {
            assert!(resource.url.is_some(), "{} has no url", resource.title);
            assert!(!resource.tags.is_empty(), "{} has no tags", resource.title);
            assert!(resource.estimated_time_minutes.unwrap_or(0) > 0);
        }
    }

    #[test]
    fn python_topic_is_covered() {
        let count = default_resources()
            .iter()
            .filter(|r| r.tags.iter().any(|t| t == "Python"))
            .count();
        assert_eq!(count, 7);
    }
}
