//! User entity model and DTOs.

use neuronav_core::brain_type::BrainType;
use neuronav_core::roadmap::User;
use neuronav_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `users` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserRow {
    pub id: DbId,
    pub name: String,
    pub email: Option<String>,
    pub brain_type: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        // The CHECK constraint keeps unknown names out, so a parse failure
        // only happens on hand-edited rows.
        let brain_type = row.brain_type.as_deref().and_then(|bt| {
            bt.parse::<BrainType>()
                .map_err(|e| tracing::warn!(user_id = row.id, error = %e, "Ignoring stored brain type"))
                .ok()
        });
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            brain_type,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}
