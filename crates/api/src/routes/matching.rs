use axum::routing::get;
use axum::Router;

use crate::handlers::matching;
use crate::state::AppState;

/// `GET /match?brain_type=..&resource_type=..` -> classify_pair
pub fn router() -> Router<AppState> {
    Router::new().route("/match", get(matching::classify_pair))
}
