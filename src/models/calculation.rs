// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Calculation history model for storage and API.

use crate::calculator::Operation;
use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Stored calculation record.
///
/// `result` is a snapshot taken when the row was written and is never
/// recomputed.
#[derive(Debug, Clone, PartialEq, Serialize, FromRow)]
pub struct Calculation {
    pub id: i64,
    #[sqlx(try_from = "String")]
    pub operation: Operation,
    pub operand_a: f64,
    pub operand_b: f64,
    pub result: f64,
    /// When the calculation was recorded
    pub timestamp: DateTime<Utc>,
    /// Owning user (cascade-deleted with the user)
    pub user_id: i64,
}
