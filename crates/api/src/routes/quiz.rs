use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::quiz;
use crate::state::AppState;

/// Routes mounted at `/quiz`.
///
/// ```text
/// GET    /questions         -> get_questions
/// POST   /questions         -> create_question
/// PUT    /questions/{id}    -> update_question
/// DELETE /questions/{id}    -> delete_question
/// POST   /submit            -> submit_quiz
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            get(quiz::get_questions).post(quiz::create_question),
        )
        .route(
            "/questions/{id}",
            put(quiz::update_question).delete(quiz::delete_question),
        )
        .route("/submit", post(quiz::submit_quiz))
}
