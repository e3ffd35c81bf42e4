//! Integration tests for step progress and summaries.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_user, generate, get, put_json};
use serde_json::json;

async fn python_roadmap(app: &axum::Router, user_id: i64) -> i64 {
    let roadmap = generate(
        app,
        json!({ "user_id": user_id, "topic": "Python", "brain_type": "Visual" }),
        StatusCode::CREATED,
    )
    .await;
    roadmap["id"].as_i64().unwrap()
}

#[tokio::test]
async fn completing_a_step_updates_roll_up() {
    let app = common::build_test_app();
    let user_id = create_user(&app, "Pat").await;
    let roadmap_id = python_roadmap(&app, user_id).await;
    let uri = format!("/api/v1/roadmaps/{roadmap_id}/progress");

    let response = put_json(app.clone(), &uri, json!({ "step_number": 1, "completed": true })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let record = body_json(response).await["data"].clone();
    assert_eq!(record["completed"], true);
    assert!(record["completed_at"].is_string());

    let response = get(app.clone(), &uri).await;
    let view = body_json(response).await["data"].clone();
    assert_eq!(view["progress"]["completed_steps"], 1);
    assert_eq!(view["progress"]["total_steps"], 7);
    assert_eq!(view["progress"]["completion_percentage"], 14.3);
    assert_eq!(view["steps"][0]["completed"], true);
    assert_eq!(view["steps"][1]["completed"], false);

    let response = get(app, &format!("/api/v1/roadmaps/{roadmap_id}")).await;
    let detail = body_json(response).await["data"].clone();
    assert_eq!(detail["step_status"][0]["completed"], true);
    assert_eq!(detail["progress"]["completed_steps"], 1);
}

#[tokio::test]
async fn uncompleting_clears_timestamp_and_keeps_one_record() {
    let app = common::build_test_app();
    let user_id = create_user(&app, "Sam").await;
    let roadmap_id = python_roadmap(&app, user_id).await;
    let uri = format!("/api/v1/roadmaps/{roadmap_id}/progress");

    let first = put_json(app.clone(), &uri, json!({ "step_number": 2, "completed": true })).await;
    let first = body_json(first).await["data"].clone();

    let second = put_json(app.clone(), &uri, json!({ "step_number": 2, "completed": false })).await;
    assert_eq!(second.status(), StatusCode::OK);
    let second = body_json(second).await["data"].clone();

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["completed"], false);
    assert!(second["completed_at"].is_null());

    let view = body_json(get(app, &uri).await).await["data"].clone();
    assert_eq!(view["progress"]["completed_steps"], 0);
}

#[tokio::test]
async fn unknown_step_is_rejected() {
    let app = common::build_test_app();
    let user_id = create_user(&app, "Kim").await;
    let roadmap_id = python_roadmap(&app, user_id).await;

    let response = put_json(
        app,
        &format!("/api/v1/roadmaps/{roadmap_id}/progress"),
        json!({ "step_number": 99, "completed": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn progress_on_missing_roadmap_is_404() {
    let app = common::build_test_app();

    let response = put_json(
        app,
        "/api/v1/roadmaps/4242/progress",
        json!({ "step_number": 1, "completed": true }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn summary_totals_across_roadmaps() {
    let app = common::build_test_app();
    let user_id = create_user(&app, "Quinn").await;
    let python_id = python_roadmap(&app, user_id).await;
    let css = generate(
        &app,
        json!({ "user_id": user_id, "topic": "CSS", "brain_type": "Visual" }),
        StatusCode::CREATED,
    )
    .await;
    let css_id = css["id"].as_i64().unwrap();

    for (roadmap_id, step) in [(python_id, 1), (python_id, 2), (css_id, 1)] {
        let response = put_json(
            app.clone(),
            &format!("/api/v1/roadmaps/{roadmap_id}/progress"),
            json!({ "step_number": step, "completed": true }),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = get(app, &format!("/api/v1/users/{user_id}/progress/summary")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let summary = body_json(response).await["data"].clone();

    assert_eq!(summary["total_roadmaps"], 2);
    assert_eq!(summary["total_steps"], 8);
    assert_eq!(summary["completed_steps"], 3);
    assert_eq!(summary["overall_percentage"], 37.5);
    assert!(summary["roadmaps"][0]["last_activity"].is_string());
}
