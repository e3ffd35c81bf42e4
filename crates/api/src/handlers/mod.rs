pub mod matching;
pub mod progress;
pub mod quiz;
pub mod roadmaps;
pub mod users;

use neuronav_core::error::CoreError;
use neuronav_core::generation::DEFAULT_INTENSITY;
use neuronav_core::roadmap::{Roadmap, User};
use neuronav_core::types::DbId;

use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// Fetch a user or fail with 404.
pub(crate) async fn load_user(state: &AppState, user_id: DbId) -> AppResult<User> {
    state
        .users
        .find_by_id(user_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "User",
            id: user_id,
        }))
}

/// Fetch a roadmap or fail with 404.
pub(crate) async fn load_roadmap(state: &AppState, roadmap_id: DbId) -> AppResult<Roadmap> {
    state
        .roadmaps
        .find_by_id(roadmap_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Roadmap",
            id: roadmap_id,
        }))
}

/// Lowercase and trim an intensity label; blank or missing means the default.
pub(crate) fn normalize_intensity(intensity: Option<&str>) -> String {
    intensity
        .map(|i| i.trim().to_lowercase())
        .filter(|i| !i.is_empty())
        .unwrap_or_else(|| DEFAULT_INTENSITY.to_string())
}

pub(crate) fn default_true() -> bool {
    true
}
