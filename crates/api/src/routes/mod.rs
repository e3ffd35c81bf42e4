pub mod health;
pub mod matching;
pub mod quiz;
pub mod roadmaps;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /users                                 create
/// /users/{id}                            get
/// /users/{id}/roadmaps                   list with progress
/// /users/{id}/progress/summary           progress across roadmaps
///
/// /quiz/questions                        list, create
/// /quiz/questions/{id}                   replace (PUT), delete
/// /quiz/submit                           score, store brain type, generate roadmap
///
/// /roadmaps                              generate (201 new, 200 existing)
/// /roadmaps/{id}                         get, delete
/// /roadmaps/{id}/progress                get, upsert step (PUT)
///
/// /match                                 classify (brain_type, resource_type)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/users", users::router())
        .nest("/quiz", quiz::router())
        .nest("/roadmaps", roadmaps::router())
        .merge(matching::router())
}
