//! Learning-resource catalog model and DTOs.

use neuronav_core::roadmap::Resource;
use neuronav_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `resources` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ResourceRow {
    pub id: DbId,
    pub title: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub url: Option<String>,
    pub estimated_time_minutes: Option<i32>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a catalog entry.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateResource {
    pub title: String,
    pub description: Option<String>,
    pub resource_type: String,
    pub url: Option<String>,
    pub estimated_time_minutes: Option<i32>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl From<ResourceRow> for Resource {
    fn from(row: ResourceRow) -> Self {
        Resource {
            id: row.id,
            title: row.title,
            description: row.description,
            resource_type: row.resource_type,
            url: row.url,
            estimated_time_minutes: row.estimated_time_minutes,
            tags: row.tags,
        }
    }
}

impl From<&Resource> for CreateResource {
    fn from(resource: &Resource) -> Self {
        CreateResource {
            title: resource.title.clone(),
            description: resource.description.clone(),
            resource_type: resource.resource_type.clone(),
            url: resource.url.clone(),
            estimated_time_minutes: resource.estimated_time_minutes,
            tags: resource.tags.clone(),
        }
    }
}
