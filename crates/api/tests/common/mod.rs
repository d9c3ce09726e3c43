#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tracker_api::config::{LogFormat, ServerConfig};
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_db::store::MemoryIssueStore;

/// Build a test `ServerConfig` backed by the in-memory store.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "memory://".to_string(),
        database_max_connections: 1,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        log_format: LogFormat::Text,
    }
}

/// Build the full application router over `store`.
///
/// Uses the same builder as `main.rs` so tests exercise the production
/// middleware stack.
pub fn build_test_app(store: Arc<MemoryIssueStore>) -> Router {
    let state = AppState { store };
    build_app_router(state, &test_config())
}

/// A fresh app with an empty store, plus a handle to inspect the store.
pub fn fresh_app() -> (Router, Arc<MemoryIssueStore>) {
    let store = Arc::new(MemoryIssueStore::new());
    (build_test_app(Arc::clone(&store)), store)
}

pub async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Send `body` as `application/x-www-form-urlencoded`. The caller encodes it.
pub async fn send_form(app: Router, method: Method, uri: &str, body: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn send_json(
    app: Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_form(app: Router, uri: &str, body: &str) -> Response<Body> {
    send_form(app, Method::POST, uri, body).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::PUT, uri, body).await
}

pub async fn delete_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::DELETE, uri, body).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an issue through the API and return the reply body.
pub async fn create_issue(
    app: Router,
    project: &str,
    body: serde_json::Value,
) -> serde_json::Value {
    let response = post_json(app, &format!("/api/issues/{project}"), body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    body_json(response).await
}
