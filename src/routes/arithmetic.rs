// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stateless arithmetic endpoints.
//!
//! `POST /add`, `/subtract`, `/multiply` and `/divide` evaluate `{"a", "b"}`.
//! When the caller names a user in the `user-id` header the evaluation is
//! also written to that user's history.

use crate::calculator::{self, Operation};
use crate::error::{AppError, Result};
use crate::middleware::CallerId;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/add", post(add))
        .route("/subtract", post(subtract))
        .route("/multiply", post(multiply))
        .route("/divide", post(divide))
}

/// Operands arrive untyped so a non-number is reported as an invalid
/// operand instead of a generic body error.
#[derive(Deserialize)]
pub struct OperationRequest {
    #[serde(default)]
    pub a: Value,
    #[serde(default)]
    pub b: Value,
}

#[derive(Serialize)]
pub struct OperationResponse {
    pub result: f64,
}

type OperationBody = WithRejection<Json<OperationRequest>, AppError>;

async fn add(
    State(state): State<Arc<AppState>>,
    caller: CallerId,
    WithRejection(Json(request), _): OperationBody,
) -> Result<Json<OperationResponse>> {
    run(&state, caller, Operation::Add, request).await
}

async fn subtract(
    State(state): State<Arc<AppState>>,
    caller: CallerId,
    WithRejection(Json(request), _): OperationBody,
) -> Result<Json<OperationResponse>> {
    run(&state, caller, Operation::Subtract, request).await
}

async fn multiply(
    State(state): State<Arc<AppState>>,
    caller: CallerId,
    WithRejection(Json(request), _): OperationBody,
) -> Result<Json<OperationResponse>> {
    run(&state, caller, Operation::Multiply, request).await
}

async fn divide(
    State(state): State<Arc<AppState>>,
    caller: CallerId,
    WithRejection(Json(request), _): OperationBody,
) -> Result<Json<OperationResponse>> {
    run(&state, caller, Operation::Divide, request).await
}

async fn run(
    state: &AppState,
    caller: CallerId,
    operation: Operation,
    request: OperationRequest,
) -> Result<Json<OperationResponse>> {
    let a = calculator::operand("a", &request.a)?;
    let b = calculator::operand("b", &request.b)?;
    let evaluation = calculator::evaluate(operation, a, b)?;

    if let CallerId(Some(user_id)) = caller {
        state.history.record(user_id, &evaluation).await?;
    }

    Ok(Json(OperationResponse {
        result: evaluation.result(),
    }))
}
