use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{progress, roadmaps};
use crate::state::AppState;

/// Routes mounted at `/roadmaps`.
///
/// ```text
/// POST   /                  -> generate_roadmap
/// GET    /{id}              -> get_roadmap
/// DELETE /{id}              -> delete_roadmap
/// GET    /{id}/progress     -> get_progress
/// PUT    /{id}/progress     -> update_progress
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(roadmaps::generate_roadmap))
        .route(
            "/{id}",
            get(roadmaps::get_roadmap).delete(roadmaps::delete_roadmap),
        )
        .route(
            "/{id}/progress",
            get(progress::get_progress).put(progress::update_progress),
        )
}
