// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Arithmetic endpoint tests.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

mod common;

#[tokio::test]
async fn test_add() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) = common::post_json(&app, "/add", json!({"a": 10, "b": 5})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"result": 15.0}));
}

#[tokio::test]
async fn test_each_operation() {
    let (app, _state) = common::create_test_app().await;

    for (uri, expected) in [
        ("/add", 12.5),
        ("/subtract", 7.5),
        ("/multiply", 25.0),
        ("/divide", 4.0),
    ] {
        let (status, body) = common::post_json(&app, uri, json!({"a": 10.0, "b": 2.5})).await;
        assert_eq!(status, StatusCode::OK, "{uri}");
        assert_eq!(body["result"].as_f64(), Some(expected), "{uri}");
    }
}

#[tokio::test]
async fn test_divide_by_zero() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) = common::post_json(&app, "/divide", json!({"a": 10, "b": 0})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Cannot divide by zero!");
    assert_eq!(body["code"], "division_by_zero");
}

#[tokio::test]
async fn test_non_numeric_operand() {
    let (app, _state) = common::create_test_app().await;

    for payload in [
        json!({"a": "ten", "b": 5}),
        json!({"a": 10, "b": true}),
        json!({"a": [1], "b": 5}),
        json!({"a": 10}),
    ] {
        let (status, body) = common::post_json(&app, "/add", payload.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        assert_eq!(body["code"], "invalid_operand", "{payload}");
        assert!(body["error"].as_str().unwrap().starts_with("Invalid operand"));
    }
}

#[tokio::test]
async fn test_overflow_is_bad_request() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) =
        common::post_json(&app, "/multiply", json!({"a": 1.0e308, "b": 10})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "non_finite_result");
}

#[tokio::test]
async fn test_malformed_json() {
    let (app, _state) = common::create_test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/add")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"a\": 10, \"b\":"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_without_user_id_nothing_is_recorded() {
    let (app, state) = common::create_test_app().await;
    let user_id = common::create_user(&app, "testuser", "test@example.com").await;

    let (status, _) = common::post_json(&app, "/add", json!({"a": 1, "b": 2})).await;
    assert_eq!(status, StatusCode::OK);

    assert!(state.db
        .get_calculations_for_user(user_id, 0, None)
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_user_id_header_records_history() {
    let (app, _state) = common::create_test_app().await;
    let user_id = common::create_user(&app, "testuser", "test@example.com").await;
    let header = user_id.to_string();

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/multiply",
        Some(json!({"a": 6, "b": 7})),
        Some(&header),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["result"].as_f64(), Some(42.0));

    let (status, history) =
        common::get(&app, &format!("/users/{user_id}/calculations")).await;
    assert_eq!(status, StatusCode::OK);
    let history = history.as_array().unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0]["operation"], "multiply");
    assert_eq!(history[0]["operand_a"].as_f64(), Some(6.0));
    assert_eq!(history[0]["operand_b"].as_f64(), Some(7.0));
    assert_eq!(history[0]["result"].as_f64(), Some(42.0));
    assert_eq!(history[0]["user_id"].as_i64(), Some(user_id));
}

#[tokio::test]
async fn test_unknown_user_id_header() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/add",
        Some(json!({"a": 1, "b": 2})),
        Some("999"),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

// The operands are judged before the caller is looked up.
#[tokio::test]
async fn test_division_error_wins_over_unknown_user() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/divide",
        Some(json!({"a": 1, "b": 0})),
        Some("999"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "division_by_zero");
}

#[tokio::test]
async fn test_non_integer_user_id_header() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) = common::send(
        &app,
        Method::POST,
        "/add",
        Some(json!({"a": 1, "b": 2})),
        Some("alice"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_failed_division_leaves_no_row() {
    let (app, state) = common::create_test_app().await;
    let user_id = common::create_user(&app, "testuser", "test@example.com").await;
    let header = user_id.to_string();

    let (status, _) = common::send(
        &app,
        Method::POST,
        "/divide",
        Some(json!({"a": 1, "b": 0})),
        Some(&header),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(state.db
        .get_calculations_for_user(user_id, 0, None)
        .await
        .unwrap()
        .is_empty());
}
