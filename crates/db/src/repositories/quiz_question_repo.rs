//! Repository for the `quiz_questions` table.

use neuronav_core::assessment::NewQuizQuestion;
use neuronav_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::quiz_question::QuizQuestionRow;

const COLUMNS: &str = "id, text, options, created_at, updated_at";

/// Provides CRUD operations for the question bank.
pub struct QuizQuestionRepo;

impl QuizQuestionRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<QuizQuestionRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM quiz_questions ORDER BY id");
        sqlx::query_as::<_, QuizQuestionRow>(&query)
            .fetch_all(pool)
            .await
    }

    pub async fn create(
        pool: &PgPool,
        input: &NewQuizQuestion,
    ) -> Result<QuizQuestionRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO quiz_questions (text, options) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestionRow>(&query)
            .bind(&input.text)
            .bind(Json(&input.options))
            .fetch_one(pool)
            .await
    }

    /// Replace text and options. Returns `None` if no such question.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &NewQuizQuestion,
    ) -> Result<Option<QuizQuestionRow>, sqlx::Error> {
        let query = format!(
            "UPDATE quiz_questions SET text = $2, options = $3 WHERE id = $1 RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, QuizQuestionRow>(&query)
            .bind(id)
            .bind(&input.text)
            .bind(Json(&input.options))
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM quiz_questions WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM quiz_questions")
            .fetch_one(pool)
            .await
    }
}
