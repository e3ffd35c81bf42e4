//! Classification lookup for a (brain type, resource type) pair.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use neuronav_core::brain_type::BrainType;
use neuronav_core::classify::MatchLevel;
use neuronav_core::preference::normalize_resource_type;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchParams {
    pub brain_type: String,
    pub resource_type: String,
}

#[derive(Debug, Serialize)]
pub struct MatchResult {
    pub brain_type: BrainType,
    pub resource_type: String,
    pub normalized_resource_type: String,
    pub weight: f64,
    pub match_level: MatchLevel,
}

/// GET /api/v1/match?brain_type=..&resource_type=..
pub async fn classify_pair(
    State(state): State<AppState>,
    Query(params): Query<MatchParams>,
) -> AppResult<impl IntoResponse> {
    let brain_type: BrainType = params.brain_type.parse()?;
    let navigator = &state.navigator;

    let weight = navigator.weight_of(brain_type, &params.resource_type);
    let data = MatchResult {
        brain_type,
        normalized_resource_type: normalize_resource_type(navigator, &params.resource_type),
        resource_type: params.resource_type,
        weight,
        match_level: MatchLevel::from_weight(weight, &navigator.thresholds),
    };

    Ok(Json(DataResponse { data }))
}
