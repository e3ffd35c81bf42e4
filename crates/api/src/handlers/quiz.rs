//! Handlers for the learning-style assessment and its question bank.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use neuronav_core::assessment::{
    present_questions, score_answers, AssessmentResult, NewQuizQuestion, QuizAnswer, QuizQuestion,
    QUIZ_INSTRUCTIONS,
};
use neuronav_core::brain_type::BrainTypeProfile;
use neuronav_core::error::CoreError;
use neuronav_core::generation::DEFAULT_TOPIC;
use neuronav_core::types::DbId;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};
use crate::handlers::roadmaps::generate_for_user;
use crate::handlers::{default_true, load_user};
use crate::response::DataResponse;
use crate::state::AppState;

pub const NEXT_STEPS: [&str; 4] = [
    "Review your personalized roadmap",
    "Start with the first learning step",
    "Track your progress as you complete each step",
    "Adjust your learning pace as needed",
];

pub const COMPLETION_MESSAGE: &str =
    "Quiz completed successfully! Your personalized learning roadmap has been generated.";

#[derive(Debug, Serialize)]
pub struct QuizView {
    pub questions: Vec<QuizQuestion>,
    pub total_questions: usize,
    pub instructions: &'static str,
}

#[derive(Debug, Default, Deserialize)]
pub struct QuizPreferences {
    #[serde(default)]
    pub topic: Option<String>,
    #[serde(default)]
    pub intensity: Option<String>,
}

/// Request body for `POST /api/v1/quiz/submit`.
#[derive(Debug, Deserialize)]
pub struct SubmitQuizRequest {
    pub user_id: DbId,
    pub answers: Vec<QuizAnswer>,
    #[serde(default)]
    pub preferences: QuizPreferences,
    #[serde(default = "default_true")]
    pub use_ai: bool,
}

#[derive(Debug, Serialize)]
pub struct GeneratedRoadmapSummary {
    pub roadmap_id: DbId,
    pub topic: String,
    pub estimated_completion_weeks: i32,
    pub daily_time_minutes: i32,
    pub total_steps: usize,
    pub ai_generated: bool,
}

#[derive(Debug, Serialize)]
pub struct QuizSubmission {
    pub assessment_results: AssessmentResult,
    pub brain_type_description: BrainTypeProfile,
    pub roadmap: GeneratedRoadmapSummary,
    pub next_steps: [&'static str; 4],
    pub message: &'static str,
}

/// GET /api/v1/quiz/questions
///
/// The stored bank, numbered `q1..` in id order.
pub async fn get_questions(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let questions = present_questions(&state.quiz.list_questions().await?);
    Ok(Json(DataResponse {
        data: QuizView {
            total_questions: questions.len(),
            questions,
            instructions: QUIZ_INSTRUCTIONS,
        },
    }))
}

/// POST /api/v1/quiz/questions
pub async fn create_question(
    State(state): State<AppState>,
    Json(input): Json<NewQuizQuestion>,
) -> AppResult<impl IntoResponse> {
    let input = input.validated()?;
    let question = state.quiz.create_question(&input).await?;

    tracing::info!(question_id = question.id, "Quiz question created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: question })))
}

/// PUT /api/v1/quiz/questions/{id}
///
/// Replaces the text and the full option list.
pub async fn update_question(
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
    Json(input): Json<NewQuizQuestion>,
) -> AppResult<impl IntoResponse> {
    let input = input.validated()?;
    let question = state
        .quiz
        .update_question(question_id, &input)
        .await?
        .ok_or(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        })?;

    tracing::info!(question_id, "Quiz question updated");

    Ok(Json(DataResponse { data: question }))
}

/// DELETE /api/v1/quiz/questions/{id}
pub async fn delete_question(
    State(state): State<AppState>,
    Path(question_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    if !state.quiz.delete_question(question_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Question",
            id: question_id,
        }));
    }

    tracing::info!(question_id, "Quiz question deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/quiz/submit
///
/// Scores the answers, stores the dominant brain type on the user and
/// generates a roadmap for the preferred topic.
pub async fn submit_quiz(
    State(state): State<AppState>,
    Json(input): Json<SubmitQuizRequest>,
) -> AppResult<impl IntoResponse> {
    if input.answers.is_empty() {
        return Err(AppError::BadRequest("Answers are required".to_string()));
    }
    load_user(&state, input.user_id).await?;

    let bank = state.quiz.list_questions().await?;
    let result = score_answers(&bank, &input.answers);
    if result.total_questions_answered == 0 {
        return Err(AppError::BadRequest(
            "None of the answers reference a known question and option".to_string(),
        ));
    }

    state
        .users
        .set_brain_type(input.user_id, result.brain_type)
        .await?;
    tracing::info!(
        user_id = input.user_id,
        brain_type = %result.brain_type,
        confidence = result.confidence_score,
        "Assessment recorded"
    );

    let topic = input
        .preferences
        .topic
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(DEFAULT_TOPIC);

    let outcome = generate_for_user(
        &state,
        input.user_id,
        topic,
        input.preferences.intensity.as_deref(),
        Some(result.brain_type),
        input.use_ai,
    )
    .await?;
    let roadmap = outcome.roadmap;

    Ok(Json(DataResponse {
        data: QuizSubmission {
            brain_type_description: result.brain_type.profile(),
            assessment_results: result,
            roadmap: GeneratedRoadmapSummary {
                roadmap_id: roadmap.id,
                topic: roadmap.topic,
                estimated_completion_weeks: roadmap.estimated_completion_weeks,
                daily_time_minutes: roadmap.daily_time_minutes,
                total_steps: roadmap.steps.len(),
                ai_generated: roadmap.ai_generated,
            },
            next_steps: NEXT_STEPS,
            message: COMPLETION_MESSAGE,
        },
    }))
}
