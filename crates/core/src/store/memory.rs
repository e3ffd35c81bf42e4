//! In-process implementation of every store trait.
//!
//! All tables sit behind one [`RwLock`], so the find-or-create in
//! [`RoadmapStore::insert_or_get`] runs as a single critical section.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::{NewUser, ProgressStore, QuizStore, ResourceCatalog, RoadmapStore, UserStore};
use crate::assessment::{NewQuizQuestion, StoredQuizQuestion};
use crate::brain_type::BrainType;
use crate::error::CoreError;
use crate::roadmap::{NewRoadmap, ProgressRecord, Resource, Roadmap, User};
use crate::types::DbId;

#[derive(Default)]
struct Tables {
    last_id: DbId,
    users: Vec<User>,
    resources: Vec<Resource>,
    roadmaps: Vec<Roadmap>,
    progress: Vec<ProgressRecord>,
    questions: Vec<StoredQuizQuestion>,
}

impl Tables {
    fn next_id(&mut self) -> DbId {
        self.last_id += 1;
        self.last_id
    }

    fn insert_question(&mut self, input: &NewQuizQuestion) -> StoredQuizQuestion {
        let now = Utc::now();
        let question = StoredQuizQuestion {
            id: self.next_id(),
            text: input.text.clone(),
            options: input.options.clone(),
            created_at: now,
            updated_at: now,
        };
        self.questions.push(question.clone());
        question
    }
}

/// Case-insensitive substring match of `topic` against title, description
/// and tags.
pub fn resource_matches_topic(resource: &Resource, topic: &str) -> bool {
    let needle = topic.trim().to_lowercase();
    if needle.is_empty() {
        return false;
    }
    resource.title.to_lowercase().contains(&needle)
        || resource
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(&needle))
        || resource
            .tags
            .iter()
            .any(|t| t.to_lowercase().contains(&needle))
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    roadmap_inserts: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-loaded with a resource catalog. Resource ids are
    /// reassigned in input order.
    pub fn with_resources(resources: Vec<Resource>) -> Self {
        let mut tables = Tables::default();
        for mut resource in resources {
            resource.id = tables.next_id();
            tables.resources.push(resource);
        }
        Self {
            tables: RwLock::new(tables),
            roadmap_inserts: AtomicUsize::new(0),
        }
    }

    /// Append a question bank, e.g. [`default_questions`](crate::assessment::default_questions).
    pub fn with_questions(mut self, questions: Vec<NewQuizQuestion>) -> Self {
        let tables = self.tables.get_mut();
        for question in &questions {
            tables.insert_question(question);
        }
        self
    }

    /// Number of roadmaps actually inserted (not returned as existing).
    pub fn roadmap_insert_count(&self) -> usize {
        self.roadmap_inserts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResourceCatalog for MemoryStore {
    async fn find_resources(&self, topic: &str) -> Result<Vec<Resource>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .resources
            .iter()
            .filter(|r| resource_matches_topic(r, topic))
            .cloned()
            .collect())
    }

    async fn find_general_resources(&self, limit: usize) -> Result<Vec<Resource>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.resources.iter().take(limit).cloned().collect())
    }
}

#[async_trait]
impl RoadmapStore for MemoryStore {
    async fn find_existing(
        &self,
        user_id: DbId,
        topic: &str,
        brain_type: BrainType,
    ) -> Result<Option<Roadmap>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .roadmaps
            .iter()
            .find(|r| r.user_id == user_id && r.topic == topic && r.brain_type == brain_type)
            .cloned())
    }

    async fn insert_or_get(&self, input: NewRoadmap) -> Result<(Roadmap, bool), CoreError> {
        let mut tables = self.tables.write().await;
        if let Some(existing) = tables.roadmaps.iter().find(|r| {
            r.user_id == input.user_id && r.topic == input.topic && r.brain_type == input.brain_type
        }) {
            return Ok((existing.clone(), false));
        }

        let now = Utc::now();
        let roadmap = Roadmap {
            id: tables.next_id(),
            user_id: input.user_id,
            topic: input.topic,
            brain_type: input.brain_type,
            intensity: input.intensity,
            steps: input.steps,
            estimated_completion_weeks: input.estimated_completion_weeks,
            daily_time_minutes: input.daily_time_minutes,
            ai_generated: input.ai_generated,
            overview: input.overview,
            strategies: input.strategies,
            references: input.references,
            created_at: now,
            updated_at: now,
        };
        tables.roadmaps.push(roadmap.clone());
        self.roadmap_inserts.fetch_add(1, Ordering::SeqCst);
        Ok((roadmap, true))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Roadmap>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.roadmaps.iter().find(|r| r.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Roadmap>, CoreError> {
        let tables = self.tables.read().await;
        let mut roadmaps: Vec<Roadmap> = tables
            .roadmaps
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect();
        roadmaps.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(roadmaps)
    }

    async fn list_all(&self) -> Result<Vec<Roadmap>, CoreError> {
        Ok(self.tables.read().await.roadmaps.clone())
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.roadmaps.len();
        tables.roadmaps.retain(|r| r.id != id);
        let removed = tables.roadmaps.len() != before;
        if removed {
            tables.progress.retain(|p| p.roadmap_id != id);
        }
        Ok(removed)
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn upsert(
        &self,
        user_id: DbId,
        roadmap_id: DbId,
        step_number: i32,
        completed: bool,
    ) -> Result<ProgressRecord, CoreError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();
        let completed_at = completed.then_some(now);

        if let Some(record) = tables.progress.iter_mut().find(|p| {
            p.user_id == user_id && p.roadmap_id == roadmap_id && p.step_number == step_number
        }) {
            record.completed = completed;
            record.completed_at = completed_at;
            record.updated_at = now;
            return Ok(record.clone());
        }

        let record = ProgressRecord {
            id: tables.next_id(),
            user_id,
            roadmap_id,
            step_number,
            completed,
            completed_at,
            created_at: now,
            updated_at: now,
        };
        tables.progress.push(record.clone());
        Ok(record)
    }

    async fn find_all(
        &self,
        user_id: DbId,
        roadmap_id: DbId,
    ) -> Result<Vec<ProgressRecord>, CoreError> {
        let tables = self.tables.read().await;
        let mut records: Vec<ProgressRecord> = tables
            .progress
            .iter()
            .filter(|p| p.user_id == user_id && p.roadmap_id == roadmap_id)
            .cloned()
            .collect();
        records.sort_by_key(|p| p.step_number);
        Ok(records)
    }

    async fn find_for_user(&self, user_id: DbId) -> Result<Vec<ProgressRecord>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables
            .progress
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_all(&self) -> Result<Vec<ProgressRecord>, CoreError> {
        Ok(self.tables.read().await.progress.clone())
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        let mut tables = self.tables.write().await;
        if let Some(email) = &input.email {
            if tables.users.iter().any(|u| u.email.as_ref() == Some(email)) {
                return Err(CoreError::Conflict(format!(
                    "A user with email '{email}' already exists"
                )));
            }
        }
        let now = Utc::now();
        let user = User {
            id: tables.next_id(),
            name: input.name.clone(),
            email: input.email.clone(),
            brain_type: None,
            created_at: now,
            updated_at: now,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn set_brain_type(
        &self,
        id: DbId,
        brain_type: BrainType,
    ) -> Result<Option<User>, CoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.users.iter_mut().find(|u| u.id == id).map(|user| {
            user.brain_type = Some(brain_type);
            user.updated_at = Utc::now();
            user.clone()
        }))
    }

    async fn list_all(&self) -> Result<Vec<User>, CoreError> {
        Ok(self.tables.read().await.users.clone())
    }
}

#[async_trait]
impl QuizStore for MemoryStore {
    async fn list_questions(&self) -> Result<Vec<StoredQuizQuestion>, CoreError> {
        Ok(self.tables.read().await.questions.clone())
    }

    async fn create_question(
        &self,
        input: &NewQuizQuestion,
    ) -> Result<StoredQuizQuestion, CoreError> {
        Ok(self.tables.write().await.insert_question(input))
    }

    async fn update_question(
        &self,
        id: DbId,
        input: &NewQuizQuestion,
    ) -> Result<Option<StoredQuizQuestion>, CoreError> {
        let mut tables = self.tables.write().await;
        Ok(tables.questions.iter_mut().find(|q| q.id == id).map(|question| {
            question.text = input.text.clone();
            question.options = input.options.clone();
            question.updated_at = Utc::now();
            question.clone()
        }))
    }

    async fn delete_question(&self, id: DbId) -> Result<bool, CoreError> {
        let mut tables = self.tables.write().await;
        let before = tables.questions.len();
        tables.questions.retain(|q| q.id != id);
        Ok(tables.questions.len() != before)
    }
}
