//! Roadmap entity model and DTOs.
//!
//! Steps are stored as a JSONB array; the remaining metadata is relational.

use neuronav_core::error::CoreError;
use neuronav_core::roadmap::{NewRoadmap, Roadmap, Step};
use neuronav_core::types::{DbId, Timestamp};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `roadmaps` table.
#[derive(Debug, Clone, FromRow)]
pub struct RoadmapRow {
    pub id: DbId,
    pub user_id: DbId,
    pub topic: String,
    pub brain_type: String,
    pub intensity: String,
    pub steps: Json<Vec<Step>>,
    pub estimated_completion_weeks: i32,
    pub daily_time_minutes: i32,
    pub ai_generated: bool,
    pub overview: Option<String>,
    pub strategies: Vec<String>,
    pub reference_links: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a roadmap.
#[derive(Debug, Clone)]
pub struct CreateRoadmap {
    pub user_id: DbId,
    pub topic: String,
    pub brain_type: String,
    pub intensity: String,
    pub steps: Json<Vec<Step>>,
    pub estimated_completion_weeks: i32,
    pub daily_time_minutes: i32,
    pub ai_generated: bool,
    pub overview: Option<String>,
    pub strategies: Vec<String>,
    pub reference_links: Vec<String>,
}

impl From<NewRoadmap> for CreateRoadmap {
    fn from(input: NewRoadmap) -> Self {
        CreateRoadmap {
            user_id: input.user_id,
            topic: input.topic,
            brain_type: input.brain_type.to_string(),
            intensity: input.intensity,
            steps: Json(input.steps),
            estimated_completion_weeks: input.estimated_completion_weeks,
            daily_time_minutes: input.daily_time_minutes,
            ai_generated: input.ai_generated,
            overview: input.overview,
            strategies: input.strategies,
            reference_links: input.references,
        }
    }
}

impl TryFrom<RoadmapRow> for Roadmap {
    type Error = CoreError;

    fn try_from(row: RoadmapRow) -> Result<Self, Self::Error> {
        let brain_type = row.brain_type.parse().map_err(|_| {
            CoreError::Internal(format!(
                "Roadmap {} has unknown brain type '{}'",
                row.id, row.brain_type
            ))
        })?;
        Ok(Roadmap {
            id: row.id,
            user_id: row.user_id,
            topic: row.topic,
            brain_type,
            intensity: row.intensity,
            steps: row.steps.0,
            estimated_completion_weeks: row.estimated_completion_weeks,
            daily_time_minutes: row.daily_time_minutes,
            ai_generated: row.ai_generated,
            overview: row.overview,
            strategies: row.strategies,
            references: row.reference_links,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}
