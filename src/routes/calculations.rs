// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calculation history routes.

use crate::calculator;
use crate::error::{AppError, Result};
use crate::middleware::CallerId;
use crate::models::Calculation;
use crate::routes::PageQuery;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/calculations",
            get(list_calculations).post(create_calculation),
        )
        .route("/calculations/{calculation_id}", get(get_calculation))
}

#[derive(Deserialize)]
pub struct CreateCalculationRequest {
    pub operation: Option<String>,
    #[serde(default)]
    pub operand_a: Value,
    #[serde(default)]
    pub operand_b: Value,
    /// Falls back to the `user-id` header when absent.
    pub user_id: Option<i64>,
}

/// Evaluate and record a calculation.
async fn create_calculation(
    State(state): State<Arc<AppState>>,
    caller: CallerId,
    WithRejection(Json(request), _): WithRejection<Json<CreateCalculationRequest>, AppError>,
) -> Result<(StatusCode, Json<Calculation>)> {
    let user_id = request
        .user_id
        .or(caller.0)
        .ok_or_else(|| AppError::BadRequest("user_id: field required".to_string()))?;
    let operation = request
        .operation
        .ok_or_else(|| AppError::BadRequest("operation: field required".to_string()))?;

    let evaluation = calculator::evaluate_raw(
        &operation,
        ("operand_a", &request.operand_a),
        ("operand_b", &request.operand_b),
    )?;
    let calculation = state.history.record(user_id, &evaluation).await?;

    Ok((StatusCode::CREATED, Json(calculation)))
}

/// The caller's history, paged.
async fn list_calculations(
    State(state): State<Arc<AppState>>,
    caller: CallerId,
    WithRejection(Query(page), _): WithRejection<Query<PageQuery>, AppError>,
) -> Result<Json<Vec<Calculation>>> {
    let user_id = caller.required()?;
    let calculations = state
        .history
        .for_user(user_id, page.skip, Some(page.bounded_limit()))
        .await?;
    Ok(Json(calculations))
}

async fn get_calculation(
    State(state): State<Arc<AppState>>,
    WithRejection(Path(calculation_id), _): WithRejection<Path<i64>, AppError>,
) -> Result<Json<Calculation>> {
    Ok(Json(state.history.get(calculation_id).await?))
}
