// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use calc_history::config::Config;
use calc_history::db::Database;
use calc_history::routes::create_router;
use calc_history::AppState;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

/// Create a fresh in-memory database.
#[allow(dead_code)]
pub async fn test_db() -> Database {
    Database::in_memory()
        .await
        .expect("Failed to open in-memory database")
}

/// Create a test app over its own in-memory database.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub async fn create_test_app() -> (Router, Arc<AppState>) {
    let config = Config::test_default();
    let db = test_db().await;
    let state = Arc::new(AppState::new(config, db).expect("Failed to build app state"));

    (create_router(state.clone()), state)
}

/// Send a request and return the status and decoded JSON body
/// (`Value::Null` for an empty or non-JSON body).
#[allow(dead_code)]
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
    user_id: Option<&str>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(id) = user_id {
        builder = builder.header("user-id", id);
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

#[allow(dead_code)]
pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body), None).await
}

#[allow(dead_code)]
pub async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None, None).await
}

/// Register a user through the API and return its ID.
#[allow(dead_code)]
pub async fn create_user(app: &Router, username: &str, email: &str) -> i64 {
    let (status, body) = post_json(
        app,
        "/users",
        json!({ "username": username, "email": email, "password": "securepassword123" }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "user creation failed: {body}");
    body["id"].as_i64().expect("user id")
}
