//! Persistence seams.
//!
//! The generation workflow and the HTTP layer only see these traits. The
//! Postgres implementation lives in `neuronav-db`; [`memory::MemoryStore`]
//! backs tests and database-less development runs.

pub mod memory;

use async_trait::async_trait;

use crate::assessment::{NewQuizQuestion, StoredQuizQuestion};
use crate::brain_type::BrainType;
use crate::error::CoreError;
use crate::roadmap::{NewRoadmap, ProgressRecord, Resource, Roadmap, User};
use crate::types::DbId;

/// Input for creating a user.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: Option<String>,
}

/// Read access to the learning-resource catalog.
#[async_trait]
pub trait ResourceCatalog: Send + Sync {
    /// Resources whose title, description or tags mention `topic`
    /// (case-insensitive).
    async fn find_resources(&self, topic: &str) -> Result<Vec<Resource>, CoreError>;

    /// Up to `limit` resources regardless of topic, used when the topic
    /// lookup comes back empty.
    async fn find_general_resources(&self, limit: usize) -> Result<Vec<Resource>, CoreError>;
}

#[async_trait]
pub trait RoadmapStore: Send + Sync {
    async fn find_existing(
        &self,
        user_id: DbId,
        topic: &str,
        brain_type: BrainType,
    ) -> Result<Option<Roadmap>, CoreError>;

    /// Atomic find-or-create keyed by (user, topic, brain type).
    ///
    /// Returns the stored roadmap and `true` when this call inserted it, or
    /// the already-present roadmap and `false` when a concurrent or earlier
    /// request won.
    async fn insert_or_get(&self, roadmap: NewRoadmap) -> Result<(Roadmap, bool), CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<Roadmap>, CoreError>;

    /// Newest first.
    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Roadmap>, CoreError>;

    async fn list_all(&self) -> Result<Vec<Roadmap>, CoreError>;

    /// Delete a roadmap and its progress records. Returns `true` if it existed.
    async fn delete(&self, id: DbId) -> Result<bool, CoreError>;
}

#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Insert or update the single record for (user, roadmap, step).
    ///
    /// `completed_at` is set to now when `completed` is true and cleared
    /// otherwise.
    async fn upsert(
        &self,
        user_id: DbId,
        roadmap_id: DbId,
        step_number: i32,
        completed: bool,
    ) -> Result<ProgressRecord, CoreError>;

    /// Ordered by step number.
    async fn find_all(
        &self,
        user_id: DbId,
        roadmap_id: DbId,
    ) -> Result<Vec<ProgressRecord>, CoreError>;

    async fn find_for_user(&self, user_id: DbId) -> Result<Vec<ProgressRecord>, CoreError>;

    async fn list_all(&self) -> Result<Vec<ProgressRecord>, CoreError>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError>;

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError>;

    /// Returns `None` if the user does not exist.
    async fn set_brain_type(
        &self,
        id: DbId,
        brain_type: BrainType,
    ) -> Result<Option<User>, CoreError>;

    async fn list_all(&self) -> Result<Vec<User>, CoreError>;
}

/// The editable VARK question bank.
#[async_trait]
pub trait QuizStore: Send + Sync {
    /// Ordered by id. Position `n` is presented as question `q{n+1}`.
    async fn list_questions(&self) -> Result<Vec<StoredQuizQuestion>, CoreError>;

    async fn create_question(
        &self,
        input: &NewQuizQuestion,
    ) -> Result<StoredQuizQuestion, CoreError>;

    /// Replace text and options. Returns `None` if the question does not exist.
    async fn update_question(
        &self,
        id: DbId,
        input: &NewQuizQuestion,
    ) -> Result<Option<StoredQuizQuestion>, CoreError>;

    /// Returns `true` if the question existed.
    async fn delete_question(&self, id: DbId) -> Result<bool, CoreError>;
}
