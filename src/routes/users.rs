// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User routes.

use crate::error::{AppError, Result};
use crate::models::{Calculation, NewUser, User};
use crate::routes::PageQuery;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/users", get(list_users).post(create_user))
        .route("/users/{user_id}", get(get_user).delete(delete_user))
        .route("/users/{user_id}/calculations", get(get_user_calculations))
}

/// Public view of a user. The password hash is never part of it.
#[derive(Serialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

async fn create_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Json(new_user), _): WithRejection<Json<NewUser>, AppError>,
) -> Result<(StatusCode, Json<UserResponse>)> {
    let user = state.users.create(new_user).await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

async fn list_users(
    State(state): State<Arc<AppState>>,
    WithRejection(Query(page), _): WithRejection<Query<PageQuery>, AppError>,
) -> Result<Json<Vec<UserResponse>>> {
    let users = state.users.list(page.skip, page.bounded_limit()).await?;
    Ok(Json(users.into_iter().map(UserResponse::from).collect()))
}

async fn get_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<UserResponse>> {
    let user = state.users.get(user_id).await?;
    Ok(Json(user.into()))
}

async fn delete_user(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<StatusCode> {
    state.users.delete(user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// A user's full history, oldest first. Paging is optional here.
async fn get_user_calculations(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(user_id), _): WithRejection<Path<i64>, AppError>,
    WithRejection(Query(page), _): WithRejection<Query<PageQuery>, AppError>,
) -> Result<Json<Vec<Calculation>>> {
    let calculations = state
        .history
        .for_user(user_id, page.skip, page.limit)
        .await?;
    Ok(Json(calculations))
}
