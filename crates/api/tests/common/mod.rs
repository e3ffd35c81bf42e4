#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use neuronav_core::assessment::default_questions;
use neuronav_core::config::NavigatorConfig;
use neuronav_core::generation::RoadmapAuthor;
use neuronav_core::store::memory::MemoryStore;
use serde_json::Value;
use tower::ServiceExt;

use neuronav_api::config::ServerConfig;
use neuronav_api::router::build_app_router;
use neuronav_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        database_url: None,
        navigator_config: None,
    }
}

/// In-memory store loaded with the starter catalog and question bank.
pub fn seeded_store() -> Arc<MemoryStore> {
    Arc::new(
        MemoryStore::with_resources(neuronav_db::seed::default_resources())
            .with_questions(default_questions()),
    )
}

/// Build the full application router over the given store.
pub fn build_app_with(
    store: Arc<MemoryStore>,
    author: Option<Arc<dyn RoadmapAuthor>>,
) -> Router {
    let config = test_config();
    let state = AppState::new(
        config.clone(),
        NavigatorConfig::default(),
        store,
        author,
        None,
    );
    build_app_router(state, &config)
}

/// Build the full application router over a seeded in-memory store with no
/// AI author.
pub fn build_test_app() -> Router {
    build_app_with(seeded_store(), None)
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header("content-type", "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: Value) -> Response {
    send(app, Method::PUT, uri, Some(body)).await
}

/// Create a user through the API and return its id.
pub async fn create_user(app: &Router, name: &str) -> i64 {
    let response = post_json(
        app.clone(),
        "/api/v1/users",
        serde_json::json!({ "name": name }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["data"]["id"].as_i64().unwrap()
}

/// Generate a roadmap through the API, asserting the expected status, and
/// return the `data` payload.
pub async fn generate(app: &Router, body: Value, expected: StatusCode) -> Value {
    let response = post_json(app.clone(), "/api/v1/roadmaps", body).await;
    assert_eq!(response.status(), expected);
    body_json(response).await["data"].clone()
}
