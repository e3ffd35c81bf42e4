//! Repository for the `progress` table.

use neuronav_core::types::DbId;
use sqlx::PgPool;

use crate::models::progress::ProgressRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, user_id, roadmap_id, step_number, completed, completed_at, created_at, updated_at";

/// Provides upsert and listing for step progress.
pub struct ProgressRepo;

impl ProgressRepo {
    /// Insert or update the record for (user, roadmap, step).
    ///
    /// `completed_at` is stamped with `NOW()` when completing and cleared
    /// otherwise. Uses `ON CONFLICT ... DO UPDATE` to guarantee one row per
    /// step.
    pub async fn upsert(
        pool: &PgPool,
        user_id: DbId,
        roadmap_id: DbId,
        step_number: i32,
        completed: bool,
    ) -> Result<ProgressRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO progress (user_id, roadmap_id, step_number, completed, completed_at)
             VALUES ($1, $2, $3, $4, CASE WHEN $4 THEN NOW() ELSE NULL END)
             ON CONFLICT ON CONSTRAINT uq_progress_step
             DO UPDATE SET completed = EXCLUDED.completed, completed_at = EXCLUDED.completed_at
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ProgressRow>(&query)
            .bind(user_id)
            .bind(roadmap_id)
            .bind(step_number)
            .bind(completed)
            .fetch_one(pool)
            .await
    }

    pub async fn list_for_roadmap(
        pool: &PgPool,
        user_id: DbId,
        roadmap_id: DbId,
    ) -> Result<Vec<ProgressRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress WHERE user_id = $1 AND roadmap_id = $2 ORDER BY step_number"
        );
        sqlx::query_as::<_, ProgressRow>(&query)
            .bind(user_id)
            .bind(roadmap_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<ProgressRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM progress WHERE user_id = $1 ORDER BY roadmap_id, step_number"
        );
        sqlx::query_as::<_, ProgressRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<ProgressRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM progress ORDER BY id");
        sqlx::query_as::<_, ProgressRow>(&query).fetch_all(pool).await
    }
}
