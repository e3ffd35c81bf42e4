//! Handlers for roadmap generation, retrieval and deletion.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use neuronav_core::brain_type::BrainType;
use neuronav_core::error::CoreError;
use neuronav_core::generation::{GenerationOutcome, GenerationRequest};
use neuronav_core::roadmap::{ProgressRecord, Roadmap, RoadmapProgress};
use neuronav_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::{default_true, load_roadmap, load_user, normalize_intensity};
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /api/v1/roadmaps`.
#[derive(Debug, Deserialize)]
pub struct GenerateRoadmapRequest {
    pub user_id: DbId,
    pub topic: String,
    /// Defaults to `intermediate`.
    #[serde(default)]
    pub intensity: Option<String>,
    /// Overrides the user's assessed brain type.
    #[serde(default)]
    pub brain_type: Option<BrainType>,
    #[serde(default = "default_true")]
    pub use_ai: bool,
}

/// Completion state of one step.
#[derive(Debug, Serialize)]
pub struct StepStatus {
    pub step_number: i32,
    pub title: String,
    pub completed: bool,
    pub completed_at: Option<Timestamp>,
}

/// A roadmap with per-step completion and its roll-up.
#[derive(Debug, Serialize)]
pub struct RoadmapDetail {
    #[serde(flatten)]
    pub roadmap: Roadmap,
    pub step_status: Vec<StepStatus>,
    pub progress: RoadmapProgress,
}

/// Join the roadmap's steps with the stored progress records.
pub(crate) fn step_statuses(roadmap: &Roadmap, records: &[ProgressRecord]) -> Vec<StepStatus> {
    roadmap
        .steps
        .iter()
        .map(|step| {
            let record = records.iter().find(|r| r.step_number == step.step_number);
            StepStatus {
                step_number: step.step_number,
                title: step.title.clone(),
                completed: record.is_some_and(|r| r.completed),
                completed_at: record.and_then(|r| r.completed_at),
            }
        })
        .collect()
}

/// Resolve the brain type for a user and run the idempotent generator.
pub(crate) async fn generate_for_user(
    state: &AppState,
    user_id: DbId,
    topic: &str,
    intensity: Option<&str>,
    brain_type: Option<BrainType>,
    use_ai: bool,
) -> AppResult<GenerationOutcome> {
    let user = load_user(state, user_id).await?;
    let brain_type = brain_type.or(user.brain_type).ok_or_else(|| {
        AppError::Core(CoreError::Validation(format!(
            "User {user_id} has no brain type; complete the assessment or pass brain_type"
        )))
    })?;

    let outcome = state
        .generator
        .generate(GenerationRequest {
            user_id,
            topic: topic.to_string(),
            brain_type,
            intensity: normalize_intensity(intensity),
            use_ai,
        })
        .await?;
    Ok(outcome)
}

/// POST /api/v1/roadmaps
///
/// Returns 201 with a new roadmap, or 200 with the existing roadmap for the
/// same (user, topic, brain type).
pub async fn generate_roadmap(
    State(state): State<AppState>,
    Json(input): Json<GenerateRoadmapRequest>,
) -> AppResult<impl IntoResponse> {
    let outcome = generate_for_user(
        &state,
        input.user_id,
        &input.topic,
        input.intensity.as_deref(),
        input.brain_type,
        input.use_ai,
    )
    .await?;

    let status = if outcome.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((
        status,
        Json(DataResponse {
            data: outcome.roadmap,
        }),
    ))
}

/// GET /api/v1/roadmaps/{id}
pub async fn get_roadmap(
    State(state): State<AppState>,
    Path(roadmap_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let roadmap = load_roadmap(&state, roadmap_id).await?;
    let records = state.progress.find_all(roadmap.user_id, roadmap.id).await?;

    let step_status = step_statuses(&roadmap, &records);
    let progress = RoadmapProgress::from_records(&roadmap, &records);

    Ok(Json(DataResponse {
        data: RoadmapDetail {
            roadmap,
            step_status,
            progress,
        },
    }))
}

/// DELETE /api/v1/roadmaps/{id}
///
/// Removes the roadmap and its progress records.
pub async fn delete_roadmap(
    State(state): State<AppState>,
    Path(roadmap_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let deleted = state.roadmaps.delete(roadmap_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Roadmap",
            id: roadmap_id,
        }));
    }

    tracing::info!(roadmap_id, "Roadmap deleted");

    Ok(StatusCode::NO_CONTENT)
}
