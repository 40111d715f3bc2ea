// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application error types with consistent API responses.

use crate::calculator::CalcError;
use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that converts to HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Calculation(#[from] CalcError),

    #[error("User not found")]
    UserNotFound(i64),

    #[error("{0}")]
    DuplicateUser(String),

    #[error("Calculation not found")]
    CalculationNotFound(i64),

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status for this error.
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Calculation(_) | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::UserNotFound(_) | AppError::CalculationNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DuplicateUser(_) => StatusCode::CONFLICT,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Stable machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Calculation(CalcError::InvalidOperand(_)) => "invalid_operand",
            AppError::Calculation(CalcError::UnknownOperation(_)) => "unknown_operation",
            AppError::Calculation(CalcError::DivisionByZero) => "division_by_zero",
            AppError::Calculation(CalcError::NonFiniteResult) => "non_finite_result",
            AppError::UserNotFound(_) => "user_not_found",
            AppError::DuplicateUser(_) => "duplicate_user",
            AppError::CalculationNotFound(_) => "calculation_not_found",
            AppError::BadRequest(_) => "bad_request",
            AppError::Database(_) => "database_error",
            AppError::Internal(_) => "internal_error",
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    code: &'static str,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match &self {
            AppError::Database(msg) => {
                tracing::error!(error = %msg, "Database error");
                "Internal server error".to_string()
            }
            AppError::Internal(err) => {
                tracing::error!(error = %err, "Internal server error");
                "Internal server error".to_string()
            }
            other => {
                tracing::warn!(status = status.as_u16(), error = %other, "Request rejected");
                other.to_string()
            }
        };

        let body = ErrorResponse {
            error,
            code: self.code(),
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for handlers
pub type Result<T> = std::result::Result<T, AppError>;
