// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calculation history recording.

use crate::calculator::Evaluation;
use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::Calculation;

/// Persists evaluated calculations against their owning user.
#[derive(Clone)]
pub struct HistoryRecorder {
    db: Database,
}

impl HistoryRecorder {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Record an evaluation for `user_id`.
    ///
    /// The user is looked up first so a missing user is reported as
    /// `UserNotFound` rather than a constraint violation.
    pub async fn record(&self, user_id: i64, evaluation: &Evaluation) -> Result<Calculation> {
        if !self.db.user_exists(user_id).await? {
            return Err(AppError::UserNotFound(user_id));
        }

        let calculation = self
            .db
            .insert_calculation(user_id, evaluation, chrono::Utc::now())
            .await?;

        tracing::info!(
            calculation_id = calculation.id,
            user_id,
            operation = %calculation.operation,
            "Calculation recorded"
        );
        Ok(calculation)
    }

    /// Fetch a calculation by ID.
    pub async fn get(&self, calculation_id: i64) -> Result<Calculation> {
        self.db
            .get_calculation(calculation_id)
            .await?
            .ok_or(AppError::CalculationNotFound(calculation_id))
    }

    /// A user's calculations in insertion order.
    pub async fn for_user(
        &self,
        user_id: i64,
        skip: u32,
        limit: Option<u32>,
    ) -> Result<Vec<Calculation>> {
        if !self.db.user_exists(user_id).await? {
            return Err(AppError::UserNotFound(user_id));
        }
        self.db.get_calculations_for_user(user_id, skip, limit).await
    }
}
