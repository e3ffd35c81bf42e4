//! Handlers for per-step progress on a roadmap.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use neuronav_core::error::CoreError;
use neuronav_core::roadmap::RoadmapProgress;
use neuronav_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::handlers::load_roadmap;
use crate::handlers::roadmaps::{step_statuses, StepStatus};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `PUT /api/v1/roadmaps/{id}/progress`.
#[derive(Debug, Deserialize)]
pub struct UpdateProgressRequest {
    pub step_number: i32,
    pub completed: bool,
}

#[derive(Debug, Serialize)]
pub struct RoadmapProgressView {
    pub progress: RoadmapProgress,
    pub steps: Vec<StepStatus>,
}

/// PUT /api/v1/roadmaps/{id}/progress
///
/// Upserts the single record for the step. The step must exist in the
/// roadmap.
pub async fn update_progress(
    State(state): State<AppState>,
    Path(roadmap_id): Path<DbId>,
    Json(input): Json<UpdateProgressRequest>,
) -> AppResult<impl IntoResponse> {
    let roadmap = load_roadmap(&state, roadmap_id).await?;
    if roadmap.step(input.step_number).is_none() {
        return Err(CoreError::Validation(format!(
            "Roadmap {roadmap_id} has no step {}",
            input.step_number
        ))
        .into());
    }

    let record = state
        .progress
        .upsert(roadmap.user_id, roadmap.id, input.step_number, input.completed)
        .await?;

    tracing::info!(
        roadmap_id,
        step_number = input.step_number,
        completed = input.completed,
        "Step progress updated"
    );

    Ok(Json(DataResponse { data: record }))
}

/// GET /api/v1/roadmaps/{id}/progress
pub async fn get_progress(
    State(state): State<AppState>,
    Path(roadmap_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let roadmap = load_roadmap(&state, roadmap_id).await?;
    let records = state.progress.find_all(roadmap.user_id, roadmap.id).await?;

    Ok(Json(DataResponse {
        data: RoadmapProgressView {
            progress: RoadmapProgress::from_records(&roadmap, &records),
            steps: step_statuses(&roadmap, &records),
        },
    }))
}
