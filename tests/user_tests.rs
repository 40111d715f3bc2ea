// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration and lookup tests.

use axum::http::{Method, StatusCode};
use calc_history::services::{Argon2Hasher, CredentialHasher};
use serde_json::json;

mod common;

#[tokio::test]
async fn test_create_user() {
    let (app, state) = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/users",
        json!({"username": "testuser", "email": "test@example.com", "password": "securepassword123"}),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "testuser");
    assert_eq!(body["email"], "test@example.com");
    assert!(body["id"].is_i64());
    assert!(body["created_at"].is_string());
    assert!(body.get("password").is_none());
    assert!(body.get("password_hash").is_none());

    // Stored credential is a digest that still verifies.
    let user = state.users.get(body["id"].as_i64().unwrap()).await.unwrap();
    assert_ne!(user.password_hash, "securepassword123");
    let hasher = Argon2Hasher::new(&state.config.password_hash).unwrap();
    assert!(hasher
        .verify("securepassword123", &user.password_hash)
        .unwrap());
}

#[tokio::test]
async fn test_create_user_duplicate_username() {
    let (app, _state) = common::create_test_app().await;
    common::create_user(&app, "testuser", "test1@example.com").await;

    let (status, body) = common::post_json(
        &app,
        "/users",
        json!({"username": "testuser", "email": "test2@example.com", "password": "securepassword123"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Username already registered");
    assert_eq!(body["code"], "duplicate_user");
}

#[tokio::test]
async fn test_create_user_duplicate_email() {
    let (app, _state) = common::create_test_app().await;
    common::create_user(&app, "testuser1", "test@example.com").await;

    let (status, body) = common::post_json(
        &app,
        "/users",
        json!({"username": "testuser2", "email": "test@example.com", "password": "securepassword123"}),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["error"], "Email already registered");
}

#[tokio::test]
async fn test_create_user_invalid_email() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/users",
        json!({"username": "testuser", "email": "invalid-email", "password": "securepassword123"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("value is not a valid email address"));
}

#[tokio::test]
async fn test_create_user_missing_field() {
    let (app, _state) = common::create_test_app().await;

    let (status, body) = common::post_json(
        &app,
        "/users",
        json!({"username": "testuser", "email": "test@example.com"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "bad_request");
}

#[tokio::test]
async fn test_get_user() {
    let (app, _state) = common::create_test_app().await;
    let user_id = common::create_user(&app, "testuser", "test@example.com").await;

    let (status, body) = common::get(&app, &format!("/users/{user_id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"].as_i64(), Some(user_id));
    assert_eq!(body["username"], "testuser");

    let (status, body) = common::get(&app, "/users/999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "user_not_found");

    let (status, _) = common::get(&app, "/users/not-a-number").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_list_users() {
    let (app, _state) = common::create_test_app().await;
    common::create_user(&app, "alice", "alice@example.com").await;
    common::create_user(&app, "bob", "bob@example.com").await;
    common::create_user(&app, "carol", "carol@example.com").await;

    let (status, body) = common::get(&app, "/users").await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|u| u["username"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["alice", "bob", "carol"]);

    let (_, body) = common::get(&app, "/users?skip=1&limit=1").await;
    assert_eq!(body.as_array().unwrap().len(), 1);
    assert_eq!(body[0]["username"], "bob");
}

#[tokio::test]
async fn test_delete_user() {
    let (app, _state) = common::create_test_app().await;
    let user_id = common::create_user(&app, "testuser", "test@example.com").await;
    let uri = format!("/users/{user_id}");

    let (status, _) = common::send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = common::get(&app, &uri).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = common::send(&app, Method::DELETE, &uri, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // The username is free again.
    common::create_user(&app, "testuser", "test@example.com").await;
}

#[tokio::test]
async fn test_concurrent_duplicate_registration() {
    let (app, _state) = common::create_test_app().await;

    let mut handles = vec![];
    for i in 0..8 {
        let app = app.clone();
        handles.push(tokio::spawn(async move {
            common::post_json(
                &app,
                "/users",
                json!({
                    "username": "racer",
                    "email": format!("racer{i}@example.com"),
                    "password": "securepassword123"
                }),
            )
            .await
            .0
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            StatusCode::CREATED => created += 1,
            StatusCode::CONFLICT => {}
            other => panic!("unexpected status {other}"),
        }
    }
    assert_eq!(created, 1);
}
