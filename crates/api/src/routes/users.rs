use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Routes mounted at `/users`.
///
/// ```text
/// POST   /                         -> create_user
/// GET    /{id}                     -> get_user
/// GET    /{id}/roadmaps            -> list_user_roadmaps
/// GET    /{id}/progress/summary    -> progress_summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(users::create_user))
        .route("/{id}", get(users::get_user))
        .route("/{id}/roadmaps", get(users::list_user_roadmaps))
        .route("/{id}/progress/summary", get(users::progress_summary))
}
