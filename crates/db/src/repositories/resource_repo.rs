//! Repository for the `resources` catalog table.

use sqlx::PgPool;

use crate::models::resource::{CreateResource, ResourceRow};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, title, description, resource_type, url, estimated_time_minutes, tags, created_at, updated_at";

/// Escape `%`, `_` and `\` so a topic is matched literally by `ILIKE`.
pub fn like_pattern(topic: &str) -> String {
    let mut escaped = String::with_capacity(topic.len() + 2);
    escaped.push('%');
    for c in topic.trim().chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

/// Provides read access and seeding for the resource catalog.
pub struct ResourceRepo;

impl ResourceRepo {
    pub async fn create(pool: &PgPool, input: &CreateResource) -> Result<ResourceRow, sqlx::Error> {
        let query = format!(
            "INSERT INTO resources (title, description, resource_type, url, estimated_time_minutes, tags)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, ResourceRow>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.resource_type)
            .bind(&input.url)
            .bind(input.estimated_time_minutes)
            .bind(&input.tags)
            .fetch_one(pool)
            .await
    }

    /// Resources whose title, description or any tag contains `topic`,
    /// case-insensitively, in catalog order.
    pub async fn find_by_topic(pool: &PgPool, topic: &str) -> Result<Vec<ResourceRow>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM resources
             WHERE title ILIKE $1
                OR description ILIKE $1
                OR EXISTS (SELECT 1 FROM unnest(tags) AS tag WHERE tag ILIKE $1)
             ORDER BY id"
        );
        sqlx::query_as::<_, ResourceRow>(&query)
            .bind(like_pattern(topic))
            .fetch_all(pool)
            .await
    }

    /// The first `limit` resources in catalog order.
    pub async fn list(pool: &PgPool, limit: i64) -> Result<Vec<ResourceRow>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM resources ORDER BY id LIMIT $1");
        sqlx::query_as::<_, ResourceRow>(&query)
            .bind(limit)
            .fetch_all(pool)
            .await
    }

    pub async fn count(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM resources")
            .fetch_one(pool)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_wraps_and_trims() {
        assert_eq!(like_pattern(" Python "), "%Python%");
    }

    #[test]
    fn pattern_escapes_wildcards() {
        assert_eq!(like_pattern("100%_c\\d"), "%100\\%\\_c\\\\d%");
    }
}
