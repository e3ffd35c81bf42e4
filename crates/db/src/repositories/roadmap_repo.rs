//! Repository for the `roadmaps` table.

use neuronav_core::types::DbId;
use sqlx::PgPool;

use crate::models::roadmap::{CreateRoadmap, RoadmapRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, topic, brain_type, intensity, steps, \
    estimated_completion_weeks, daily_time_minutes, ai_generated, overview, \
    strategies, reference_links, created_at, updated_at";

/// Provides CRUD operations for roadmaps.
pub struct RoadmapRepo;

impl RoadmapRepo {
    /// Find the roadmap for a (user, topic, brain type) key.
    pub async fn find_by_key(
        pool: &PgPool,
        user_id: DbId,
        topic: &str,
        brain_type: &str,
    ) -> Result<Option<RoadmapRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM roadmaps WHERE user_id = $1 AND topic = $2 AND brain_type = $3"
        );
        sqlx::query_as::<_, RoadmapRow>(&query)
            .bind(user_id)
            .bind(topic)
            .bind(brain_type)
            .fetch_optional(pool)
            .await
    }

    /// Insert unless a roadmap with the same key exists.
    ///
    /// Returns `None` when `uq_roadmaps_user_topic_brain` suppressed the
    /// insert; the caller then reads the existing row.
    pub async fn insert_if_absent(
        pool: &PgPool,
        input: &CreateRoadmap,
    ) -> Result<Option<RoadmapRow>, sqlx::Error> {
        let query = format!(
            "INSERT INTO roadmaps (user_id, topic, brain_type, intensity, steps,
                 estimated_completion_weeks, daily_time_minutes, ai_generated, overview,
                 strategies, reference_links)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
             ON CONFLICT ON CONSTRAINT uq_roadmaps_user_topic_brain DO NOTHING
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RoadmapRow>(&query)
            .bind(input.user_id)
            .bind(&input.topic)
            .bind(&input.brain_type)
            .bind(&input.intensity)
            .bind(&input.steps)
            .bind(input.estimated_completion_weeks)
            .bind(input.daily_time_minutes)
            .bind(input.ai_generated)
            .bind(&input.overview)
            .bind(&input.strategies)
            .bind(&input.reference_links)
            .fetch_optional(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<RoadmapRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roadmaps WHERE id = $1");
        sqlx::query_as::<_, RoadmapRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List a user's roadmaps, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<RoadmapRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM roadmaps WHERE user_id = $1 ORDER BY created_at DESC, id DESC"
        );
        sqlx::query_as::<_, RoadmapRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<RoadmapRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM roadmaps ORDER BY id");
        sqlx::query_as::<_, RoadmapRow>(&query).fetch_all(pool).await
    }

    /// Permanently delete a roadmap; progress rows cascade. Returns `true`
    /// if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM roadmaps WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
