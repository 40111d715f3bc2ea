// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Caller identification via the `user-id` header.
//!
//! The header is trusted as-is. There is no authentication behind it.

use crate::error::AppError;
use axum::{extract::FromRequestParts, http::request::Parts};

/// Header naming the user a request acts for.
pub const USER_ID_HEADER: &str = "user-id";

/// User ID taken from the `user-id` header, if the caller sent one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CallerId(pub Option<i64>);

impl CallerId {
    /// The user ID, or a 400 naming the missing header.
    pub fn required(self) -> Result<i64, AppError> {
        self.0.ok_or_else(|| {
            AppError::BadRequest(format!("{USER_ID_HEADER} header is required"))
        })
    }
}

impl<S> FromRequestParts<S> for CallerId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let Some(value) = parts.headers.get(USER_ID_HEADER) else {
            return Ok(CallerId(None));
        };

        let user_id = value
            .to_str()
            .ok()
            .and_then(|v| v.trim().parse::<i64>().ok())
            .ok_or_else(|| {
                AppError::BadRequest(format!("{USER_ID_HEADER} header must be an integer"))
            })?;

        Ok(CallerId(Some(user_id)))
    }
}
