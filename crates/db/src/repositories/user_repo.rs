//! Repository for the `users` table.

use neuronav_core::brain_type::BrainType;
use neuronav_core::store::NewUser;
use neuronav_core::types::DbId;
use sqlx::PgPool;

use crate::models::user::UserRow;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, email, brain_type, created_at, updated_at";

/// Provides CRUD operations for users.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user with no brain type, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewUser) -> Result<UserRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO users (name, email) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserRow>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Record the outcome of an assessment. Returns `None` if no such user.
    pub async fn set_brain_type(
        pool: &PgPool,
        id: DbId,
        brain_type: BrainType,
    ) -> Result<Option<UserRow>, sqlx::Error> {
        let query = format!("UPDATE users SET brain_type = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .bind(brain_type.as_str())
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<UserRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM users ORDER BY id");
        sqlx::query_as::<_, UserRow>(&query).fetch_all(pool).await
    }
}
