//! Step progress model.

use neuronav_core::roadmap::ProgressRecord;
use neuronav_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `progress` table. At most one per (user, roadmap, step).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ProgressRow {
    pub id: DbId,
    pub user_id: DbId,
    pub roadmap_id: DbId,
    pub step_number: i32,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<ProgressRow> for ProgressRecord {
    fn from(row: ProgressRow) -> Self {
        ProgressRecord {
            id: row.id,
            user_id: row.user_id,
            roadmap_id: row.roadmap_id,
            step_number: row.step_number,
            completed: row.completed,
            completed_at: row.completed_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
