//! Roadmap generation workflow.
//!
//! Order of precedence for a (user, topic, brain type) request:
//!
//! 1. An existing roadmap for the same key is returned unchanged.
//! 2. If a [`RoadmapAuthor`] is configured and the request allows it, the
//!    author drafts the roadmap. Any author failure falls back to step 3.
//! 3. Rule-based: topic resources (or the general fallback set) are ranked
//!    by [`rank_and_select`].
//!
//! Persistence goes through [`RoadmapStore::insert_or_get`], so concurrent
//! identical requests converge on one stored roadmap.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::brain_type::BrainType;
use crate::config::NavigatorConfig;
use crate::error::CoreError;
use crate::ranking::rank_and_select;
use crate::roadmap::{NewRoadmap, Resource, Roadmap, Step};
use crate::store::{ResourceCatalog, RoadmapStore};
use crate::types::DbId;

pub const DEFAULT_TOPIC: &str = "Python Programming";
pub const DEFAULT_INTENSITY: &str = "intermediate";

// ---------------------------------------------------------------------------
// AI authoring seam
// ---------------------------------------------------------------------------

/// What an author is asked to draft.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorRequest {
    pub topic: String,
    pub brain_type: BrainType,
    pub intensity: String,
}

/// A roadmap drafted by an external author, not yet persisted.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AuthoredRoadmap {
    pub steps: Vec<Step>,
    pub estimated_completion_weeks: i32,
    pub daily_time_minutes: i32,
    pub overview: Option<String>,
    pub strategies: Vec<String>,
    pub references: Vec<String>,
}

/// External roadmap author, such as a large-language-model provider.
#[async_trait]
pub trait RoadmapAuthor: Send + Sync {
    async fn author(&self, request: &AuthorRequest) -> Result<AuthoredRoadmap, CoreError>;
}

// ---------------------------------------------------------------------------
// Workflow
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub user_id: DbId,
    pub topic: String,
    pub brain_type: BrainType,
    pub intensity: String,
    /// Allow the configured author to draft the roadmap.
    pub use_ai: bool,
}

#[derive(Debug, Clone)]
pub struct GenerationOutcome {
    pub roadmap: Roadmap,
    /// `false` when an existing roadmap was returned.
    pub created: bool,
}

#[derive(Clone)]
pub struct RoadmapGenerator {
    config: Arc<NavigatorConfig>,
    catalog: Arc<dyn ResourceCatalog>,
    roadmaps: Arc<dyn RoadmapStore>,
    author: Option<Arc<dyn RoadmapAuthor>>,
}

impl RoadmapGenerator {
    pub fn new(
        config: Arc<NavigatorConfig>,
        catalog: Arc<dyn ResourceCatalog>,
        roadmaps: Arc<dyn RoadmapStore>,
    ) -> Self {
        Self {
            config,
            catalog,
            roadmaps,
            author: None,
        }
    }

    pub fn with_author(mut self, author: Arc<dyn RoadmapAuthor>) -> Self {
        self.author = Some(author);
        self
    }

    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    pub fn has_author(&self) -> bool {
        self.author.is_some()
    }

    pub async fn generate(&self, request: GenerationRequest) -> Result<GenerationOutcome, CoreError> {
        let topic = request.topic.trim().to_string();
        if topic.is_empty() {
            return Err(CoreError::Validation("Topic must not be empty".to_string()));
        }

        if let Some(existing) = self
            .roadmaps
            .find_existing(request.user_id, &topic, request.brain_type)
            .await?
        {
            tracing::info!(
                roadmap_id = existing.id,
                user_id = request.user_id,
                %topic,
                brain_type = %request.brain_type,
                "Returning existing roadmap"
            );
            return Ok(GenerationOutcome {
                roadmap: existing,
                created: false,
            });
        }

        let draft = match self.try_author(&request, &topic).await {
            Some(draft) => draft,
            None => self.rule_based(&request, &topic).await?,
        };

        let (roadmap, created) = self.roadmaps.insert_or_get(draft).await?;
        if created {
            tracing::info!(
                roadmap_id = roadmap.id,
                user_id = roadmap.user_id,
                steps = roadmap.steps.len(),
                ai_generated = roadmap.ai_generated,
                "Roadmap generated"
            );
        } else {
            tracing::info!(
                roadmap_id = roadmap.id,
                "Concurrent request already stored this roadmap"
            );
        }
        Ok(GenerationOutcome { roadmap, created })
    }

    /// Ask the author for a draft. Failures and empty drafts are logged and
    /// yield `None` so the caller falls back to ranking.
    async fn try_author(&self, request: &GenerationRequest, topic: &str) -> Option<NewRoadmap> {
        let author = self.author.as_ref().filter(|_| request.use_ai)?;
        let author_request = AuthorRequest {
            topic: topic.to_string(),
            brain_type: request.brain_type,
            intensity: request.intensity.clone(),
        };

        match author.author(&author_request).await {
            Ok(authored) if !authored.steps.is_empty() => Some(NewRoadmap {
                user_id: request.user_id,
                topic: topic.to_string(),
                brain_type: request.brain_type,
                intensity: request.intensity.clone(),
                steps: authored.steps,
                estimated_completion_weeks: authored.estimated_completion_weeks,
                daily_time_minutes: authored.daily_time_minutes,
                ai_generated: true,
                overview: authored.overview,
                strategies: authored.strategies,
                references: authored.references,
            }),
            Ok(_) => {
                tracing::warn!(%topic, "AI author returned no steps, using rule-based ranking");
                None
            }
            Err(e) => {
                tracing::warn!(%topic, error = %e, "AI author failed, using rule-based ranking");
                None
            }
        }
    }

    async fn candidate_resources(&self, topic: &str) -> Result<Vec<Resource>, CoreError> {
        let resources = self.catalog.find_resources(topic).await?;
        if !resources.is_empty() {
            return Ok(resources);
        }

        tracing::debug!(%topic, "No topic resources, trying general catalog");
        let general = self
            .catalog
            .find_general_resources(self.config.general_resource_limit)
            .await?;
        if general.is_empty() {
            return Err(CoreError::NoResourcesAvailable {
                topic: topic.to_string(),
            });
        }
        Ok(general)
    }

    async fn rule_based(
        &self,
        request: &GenerationRequest,
        topic: &str,
    ) -> Result<NewRoadmap, CoreError> {
        let resources = self.candidate_resources(topic).await?;
        let steps = rank_and_select(&self.config, &resources, request.brain_type, &request.intensity);
        let schedule = self.config.schedule(&request.intensity);

        Ok(NewRoadmap {
            user_id: request.user_id,
            topic: topic.to_string(),
            brain_type: request.brain_type,
            intensity: request.intensity.clone(),
            steps,
            estimated_completion_weeks: schedule.total_weeks,
            daily_time_minutes: schedule.daily_minutes,
            ai_generated: false,
            overview: None,
            strategies: Vec::new(),
            references: Vec::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use assert_matches::assert_matches;

    use super::*;
    use crate::store::memory::MemoryStore;

    fn resource(title: &str, resource_type: &str) -> Resource {
        Resource {
            id: 0,
            title: title.to_string(),
            description: None,
            resource_type: resource_type.to_string(),
            url: None,
            estimated_time_minutes: Some(45),
            tags: vec!["python".into()],
        }
    }

    fn request(topic: &str) -> GenerationRequest {
        GenerationRequest {
            user_id: 1,
            topic: topic.to_string(),
            brain_type: BrainType::Visual,
            intensity: "beginner".to_string(),
            use_ai: true,
        }
    }

    fn generator(store: &Arc<MemoryStore>) -> RoadmapGenerator {
        RoadmapGenerator::new(
            Arc::new(NavigatorConfig::default()),
            store.clone(),
            store.clone(),
        )
    }

    struct FixedAuthor {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl RoadmapAuthor for FixedAuthor {
        async fn author(&self, request: &AuthorRequest) -> Result<AuthoredRoadmap, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CoreError::Upstream("provider unavailable".into()));
            }
            Ok(AuthoredRoadmap {
                steps: vec![Step {
                    step_number: 1,
                    title: format!("Beginner: learn {}", request.topic),
                    description: "Start here".into(),
                    resource_id: None,
                    resource_type: "ai_generated".into(),
                    resource_url: None,
                    estimated_time_minutes: 60,
                    tags: vec![],
                    brain_type_optimized: true,
                    phase: Some("beginner".into()),
                }],
                estimated_completion_weeks: 12,
                daily_time_minutes: 45,
                overview: Some("Overview".into()),
                strategies: vec!["Draw diagrams".into()],
                references: vec![],
            })
        }
    }

    #[tokio::test]
    async fn rule_based_generation_ranks_topic_resources() {
        let store = Arc::new(MemoryStore::with_resources(vec![
            resource("Python articles", "article"),
            resource("Python videos", "video"),
            resource("Rust videos", "video"),
        ]));
        let outcome = generator(&store).generate(request("Python")).await.unwrap();
        assert!(outcome.created);
        let roadmap = outcome.roadmap;
        assert!(!roadmap.ai_generated);
        assert_eq!(roadmap.steps.len(), 3);
        assert_eq!(roadmap.steps[0].resource_type, "video");
        assert_eq!(roadmap.daily_time_minutes, 30);
        assert_eq!(roadmap.estimated_completion_weeks, 8);
    }

    #[tokio::test]
    async fn second_identical_request_returns_same_roadmap() {
        let store = Arc::new(MemoryStore::with_resources(vec![resource("Python videos", "video")]));
        let generator = generator(&store);
        let first = generator.generate(request("Python")).await.unwrap();
        let second = generator.generate(request("Python")).await.unwrap();
        assert!(first.created);
        assert!(!second.created);
        assert_eq!(first.roadmap.id, second.roadmap.id);
        assert_eq!(store.roadmap_insert_count(), 1);
    }

    #[tokio::test]
    async fn unknown_topic_uses_general_resources() {
        let store = Arc::new(MemoryStore::with_resources(vec![
            resource("Python videos", "video"),
            resource("Python tutorial", "tutorial"),
        ]));
        let outcome = generator(&store).generate(request("Haskell")).await.unwrap();
        assert_eq!(outcome.roadmap.steps.len(), 2);
    }

    #[tokio::test]
    async fn empty_catalog_is_no_resources_available() {
        let store = Arc::new(MemoryStore::new());
        let result = generator(&store).generate(request("Python")).await;
        assert_matches!(result, Err(CoreError::NoResourcesAvailable { topic }) if topic == "Python");
        assert_eq!(store.roadmap_insert_count(), 0);
    }

    #[tokio::test]
    async fn blank_topic_is_rejected() {
        let store = Arc::new(MemoryStore::new());
        let result = generator(&store).generate(request("   ")).await;
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[tokio::test]
    async fn author_draft_is_stored_as_ai_generated() {
        let store = Arc::new(MemoryStore::new());
        let author = Arc::new(FixedAuthor {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let generator = generator(&store).with_author(author.clone());
        let outcome = generator.generate(request("Python")).await.unwrap();
        assert!(outcome.roadmap.ai_generated);
        assert_eq!(outcome.roadmap.estimated_completion_weeks, 12);
        assert_eq!(outcome.roadmap.steps[0].title, "Beginner: learn Python");
        assert_eq!(author.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failing_author_falls_back_to_ranking() {
        let store = Arc::new(MemoryStore::with_resources(vec![resource("Python videos", "video")]));
        let author = Arc::new(FixedAuthor {
            calls: AtomicUsize::new(0),
            fail: true,
        });
        let outcome = generator(&store)
            .with_author(author.clone())
            .generate(request("Python"))
            .await
            .unwrap();
        assert!(!outcome.roadmap.ai_generated);
        assert_eq!(outcome.roadmap.steps.len(), 1);
        assert_eq!(author.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn author_skipped_when_request_opts_out() {
        let store = Arc::new(MemoryStore::with_resources(vec![resource("Python videos", "video")]));
        let author = Arc::new(FixedAuthor {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let mut req = request("Python");
        req.use_ai = false;
        let outcome = generator(&store)
            .with_author(author.clone())
            .generate(req)
            .await
            .unwrap();
        assert!(!outcome.roadmap.ai_generated);
        assert_eq!(author.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn existing_roadmap_skips_author() {
        let store = Arc::new(MemoryStore::with_resources(vec![resource("Python videos", "video")]));
        let author = Arc::new(FixedAuthor {
            calls: AtomicUsize::new(0),
            fail: false,
        });
        let generator = generator(&store).with_author(author.clone());
        generator.generate(request("Python")).await.unwrap();
        generator.generate(request("Python")).await.unwrap();
        assert_eq!(author.calls.load(Ordering::SeqCst), 1);
        assert_eq!(store.roadmap_insert_count(), 1);
    }
}
