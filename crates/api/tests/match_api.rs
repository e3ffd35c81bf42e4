//! Integration tests for the classification lookup.

mod common;

use axum::http::StatusCode;
use common::{body_json, get};

#[tokio::test]
async fn video_is_high_match_for_visual() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/match?brain_type=visual&resource_type=Video").await;

    assert_eq!(response.status(), StatusCode::OK);
    let data = body_json(response).await["data"].clone();
    assert_eq!(data["brain_type"], "Visual");
    assert_eq!(data["normalized_resource_type"], "video");
    assert_eq!(data["weight"], 0.4);
    assert_eq!(data["match_level"], "high_match");
}

#[tokio::test]
async fn synonyms_are_normalized_before_lookup() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/match?brain_type=ReadWrite&resource_type=book").await;

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["resource_type"], "book");
    assert_eq!(data["normalized_resource_type"], "article");
    assert_eq!(data["match_level"], "high_match");
}

#[tokio::test]
async fn unconfigured_type_is_low_match() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/match?brain_type=Auditory&resource_type=hologram").await;

    let data = body_json(response).await["data"].clone();
    assert_eq!(data["weight"], 0.0);
    assert_eq!(data["match_level"], "low_match");
}

#[tokio::test]
async fn unknown_brain_type_is_rejected() {
    let app = common::build_test_app();
    let response = get(app, "/api/v1/match?brain_type=Telepathic&resource_type=video").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
