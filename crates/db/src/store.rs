//! [`PgStore`]: the Postgres implementation of the core store traits.

use async_trait::async_trait;
use neuronav_core::assessment::{NewQuizQuestion, StoredQuizQuestion};
use neuronav_core::brain_type::BrainType;
use neuronav_core::error::CoreError;
use neuronav_core::roadmap::{NewRoadmap, ProgressRecord, Resource, Roadmap, User};
use neuronav_core::store::{
    NewUser, ProgressStore, QuizStore, ResourceCatalog, RoadmapStore, UserStore,
};
use neuronav_core::types::DbId;

use crate::models::roadmap::CreateRoadmap;
use crate::repositories::{ProgressRepo, QuizQuestionRepo, ResourceRepo, RoadmapRepo, UserRepo};
use crate::DbPool;

/// Map a sqlx error into the domain error space.
///
/// Unique violations on `uq_` constraints become [`CoreError::Conflict`];
/// everything else is logged and reported as internal.
pub fn classify_sqlx_error(err: sqlx::Error) -> CoreError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return CoreError::Conflict(format!(
                    "Duplicate value violates unique constraint: {constraint}"
                ));
            }
        }
    }
    tracing::error!(error = %err, "Database error");
    CoreError::Internal("An internal database error occurred".to_string())
}

/// Postgres-backed store. Cheap to clone; wraps the pool.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: DbPool,
}

impl PgStore {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }
}

#[async_trait]
impl ResourceCatalog for PgStore {
    async fn find_resources(&self, topic: &str) -> Result<Vec<Resource>, CoreError> {
        let rows = ResourceRepo::find_by_topic(&self.pool, topic)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(Resource::from).collect())
    }

    async fn find_general_resources(&self, limit: usize) -> Result<Vec<Resource>, CoreError> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let rows = ResourceRepo::list(&self.pool, limit)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(Resource::from).collect())
    }
}

#[async_trait]
impl RoadmapStore for PgStore {
    async fn find_existing(
        &self,
        user_id: DbId,
        topic: &str,
        brain_type: BrainType,
    ) -> Result<Option<Roadmap>, CoreError> {
        RoadmapRepo::find_by_key(&self.pool, user_id, topic, brain_type.as_str())
            .await
            .map_err(classify_sqlx_error)?
            .map(Roadmap::try_from)
            .transpose()
    }

    async fn insert_or_get(&self, roadmap: NewRoadmap) -> Result<(Roadmap, bool), CoreError> {
        let (user_id, brain_type) = (roadmap.user_id, roadmap.brain_type);
        let topic = roadmap.topic.clone();
        let input = CreateRoadmap::from(roadmap);

        if let Some(row) = RoadmapRepo::insert_if_absent(&self.pool, &input)
            .await
            .map_err(classify_sqlx_error)?
        {
            return Ok((Roadmap::try_from(row)?, true));
        }

        // Lost the race: the unique key suppressed our insert.
        tracing::debug!(user_id, topic = %topic, "Roadmap already present, reading winner");
        let existing = self
            .find_existing(user_id, &topic, brain_type)
            .await?
            .ok_or_else(|| {
                CoreError::Internal(format!(
                    "Roadmap for user {user_id} and topic '{topic}' vanished after conflict"
                ))
            })?;
        Ok((existing, false))
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<Roadmap>, CoreError> {
        RoadmapRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?
            .map(Roadmap::try_from)
            .transpose()
    }

    async fn list_for_user(&self, user_id: DbId) -> Result<Vec<Roadmap>, CoreError> {
        RoadmapRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(classify_sqlx_error)?
            .into_iter()
            .map(Roadmap::try_from)
            .collect()
    }

    async fn list_all(&self) -> Result<Vec<Roadmap>, CoreError> {
        RoadmapRepo::list(&self.pool)
            .await
            .map_err(classify_sqlx_error)?
            .into_iter()
            .map(Roadmap::try_from)
            .collect()
    }

    async fn delete(&self, id: DbId) -> Result<bool, CoreError> {
        RoadmapRepo::delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }
}

#[async_trait]
impl ProgressStore for PgStore {
    async fn upsert(
        &self,
        user_id: DbId,
        roadmap_id: DbId,
        step_number: i32,
        completed: bool,
    ) -> Result<ProgressRecord, CoreError> {
        ProgressRepo::upsert(&self.pool, user_id, roadmap_id, step_number, completed)
            .await
            .map(ProgressRecord::from)
            .map_err(classify_sqlx_error)
    }

    async fn find_all(
        &self,
        user_id: DbId,
        roadmap_id: DbId,
    ) -> Result<Vec<ProgressRecord>, CoreError> {
        let rows = ProgressRepo::list_for_roadmap(&self.pool, user_id, roadmap_id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(ProgressRecord::from).collect())
    }

    async fn find_for_user(&self, user_id: DbId) -> Result<Vec<ProgressRecord>, CoreError> {
        let rows = ProgressRepo::list_for_user(&self.pool, user_id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(ProgressRecord::from).collect())
    }

    async fn list_all(&self) -> Result<Vec<ProgressRecord>, CoreError> {
        let rows = ProgressRepo::list(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(ProgressRecord::from).collect())
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn create(&self, input: &NewUser) -> Result<User, CoreError> {
        UserRepo::create(&self.pool, input)
            .await
            .map(User::from)
            .map_err(classify_sqlx_error)
    }

    async fn find_by_id(&self, id: DbId) -> Result<Option<User>, CoreError> {
        let row = UserRepo::find_by_id(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(User::from))
    }

    async fn set_brain_type(
        &self,
        id: DbId,
        brain_type: BrainType,
    ) -> Result<Option<User>, CoreError> {
        let row = UserRepo::set_brain_type(&self.pool, id, brain_type)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(User::from))
    }

    async fn list_all(&self) -> Result<Vec<User>, CoreError> {
        let rows = UserRepo::list(&self.pool).await.map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(User::from).collect())
    }
}

#[async_trait]
impl QuizStore for PgStore {
    async fn list_questions(&self) -> Result<Vec<StoredQuizQuestion>, CoreError> {
        let rows = QuizQuestionRepo::list(&self.pool)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(rows.into_iter().map(StoredQuizQuestion::from).collect())
    }

    async fn create_question(
        &self,
        input: &NewQuizQuestion,
    ) -> Result<StoredQuizQuestion, CoreError> {
        QuizQuestionRepo::create(&self.pool, input)
            .await
            .map(StoredQuizQuestion::from)
            .map_err(classify_sqlx_error)
    }

    async fn update_question(
        &self,
        id: DbId,
        input: &NewQuizQuestion,
    ) -> Result<Option<StoredQuizQuestion>, CoreError> {
        let row = QuizQuestionRepo::update(&self.pool, id, input)
            .await
            .map_err(classify_sqlx_error)?;
        Ok(row.map(StoredQuizQuestion::from))
    }

    async fn delete_question(&self, id: DbId) -> Result<bool, CoreError> {
        QuizQuestionRepo::delete(&self.pool, id)
            .await
            .map_err(classify_sqlx_error)
    }
}
