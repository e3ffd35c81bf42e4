//! Handlers for learners and their cross-roadmap views.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use neuronav_core::error::CoreError;
use neuronav_core::roadmap::{ProgressSummary, Roadmap, RoadmapProgress};
use neuronav_core::store::NewUser;
use neuronav_core::types::DbId;
use serde::Serialize;

use crate::error::AppResult;
use crate::handlers::load_user;
use crate::response::DataResponse;
use crate::state::AppState;

/// A roadmap together with its completion roll-up.
#[derive(Debug, Serialize)]
pub struct RoadmapWithProgress {
    #[serde(flatten)]
    pub roadmap: Roadmap,
    pub progress: RoadmapProgress,
}

fn validate_new_user(input: NewUser) -> Result<NewUser, CoreError> {
    let name = input.name.trim().to_string();
    if name.is_empty() {
        return Err(CoreError::Validation("Name must not be empty".to_string()));
    }
    let email = input
        .email
        .map(|e| e.trim().to_lowercase())
        .filter(|e| !e.is_empty());
    if let Some(email) = &email {
        if !email.contains('@') {
            return Err(CoreError::Validation(format!("Invalid email address '{email}'")));
        }
    }
    Ok(NewUser { name, email })
}

/// POST /api/v1/users
pub async fn create_user(
    State(state): State<AppState>,
    Json(input): Json<NewUser>,
) -> AppResult<impl IntoResponse> {
    let input = validate_new_user(input)?;
    let user = state.users.create(&input).await?;

    tracing::info!(user_id = user.id, "User created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: user })))
}

/// GET /api/v1/users/{id}
pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let user = load_user(&state, user_id).await?;
    Ok(Json(DataResponse { data: user }))
}

/// GET /api/v1/users/{id}/roadmaps
///
/// Newest first, each with completed/total steps and percentage.
pub async fn list_user_roadmaps(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_user(&state, user_id).await?;

    let roadmaps = state.roadmaps.list_for_user(user_id).await?;
    let records = state.progress.find_for_user(user_id).await?;

    let data: Vec<RoadmapWithProgress> = roadmaps
        .into_iter()
        .map(|roadmap| {
            let progress = RoadmapProgress::from_records(&roadmap, &records);
            RoadmapWithProgress { roadmap, progress }
        })
        .collect();

    Ok(Json(DataResponse { data }))
}

/// GET /api/v1/users/{id}/progress/summary
pub async fn progress_summary(
    State(state): State<AppState>,
    Path(user_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    load_user(&state, user_id).await?;

    let roadmaps = state.roadmaps.list_for_user(user_id).await?;
    let records = state.progress.find_for_user(user_id).await?;

    let per_roadmap = roadmaps
        .iter()
        .map(|roadmap| RoadmapProgress::from_records(roadmap, &records))
        .collect();

    Ok(Json(DataResponse {
        data: ProgressSummary::from_roadmaps(per_roadmap),
    }))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn new_user_is_trimmed_and_email_lowercased() {
        let user = validate_new_user(NewUser {
            name: "  Ada ".into(),
            email: Some(" Ada@Example.COM ".into()),
        })
        .unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email.as_deref(), Some("ada@example.com"));
    }

    #[test]
    fn blank_email_becomes_none() {
        let user = validate_new_user(NewUser {
            name: "Ada".into(),
            email: Some("   ".into()),
        })
        .unwrap();
        assert_eq!(user.email, None);
    }

    #[test]
    fn blank_name_and_bad_email_are_rejected() {
        assert_matches!(
            validate_new_user(NewUser { name: " ".into(), email: None }),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_new_user(NewUser { name: "Ada".into(), email: Some("nope".into()) }),
            Err(CoreError::Validation(_))
        );
    }
}
