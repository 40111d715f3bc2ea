// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! SQLite pool wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Users (registration, lookup, cascade deletion)
//! - Calculations (history rows owned by a user)

use crate::calculator::Evaluation;
use crate::error::AppError;
use crate::models::{Calculation, User};
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;

const USER_COLUMNS: &str = "id, username, email, password_hash, created_at";
const CALCULATION_COLUMNS: &str = "id, operation, operand_a, operand_b, result, timestamp, user_id";

/// Database handle. Cheap to clone; clones share the pool.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Connect to the database at `url` and apply migrations.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str(url)
            .map_err(|e| AppError::Database(format!("Invalid database URL: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to database: {}", e)))?;

        let db = Self { pool };
        db.migrate().await?;

        tracing::info!(max_connections, "Connected to database");
        Ok(db)
    }

    /// Create a private in-memory database for testing.
    ///
    /// Every SQLite in-memory connection is its own database, so the pool is
    /// pinned to a single connection that is never recycled.
    pub async fn in_memory() -> Result<Self, AppError> {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::Database(e.to_string()))?
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect_with(options)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        let db = Self { pool };
        db.migrate().await?;
        Ok(db)
    }

    async fn migrate(&self) -> Result<(), AppError> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::Database(format!("Migration failed: {}", e)))
    }

    // ─── User Operations ─────────────────────────────────────────

    /// Insert a user and return the stored row.
    ///
    /// A unique-constraint failure (a concurrent registration that slipped
    /// past the registry's pre-check) maps to `DuplicateUser`.
    pub async fn insert_user(
        &self,
        username: &str,
        email: &str,
        password_hash: &str,
        created_at: DateTime<Utc>,
    ) -> Result<User, AppError> {
        let sql = format!(
            "INSERT INTO users (username, email, password_hash, created_at) \
             VALUES (?, ?, ?, ?) RETURNING {USER_COLUMNS}"
        );

        sqlx::query_as::<_, User>(&sql)
            .bind(username)
            .bind(email)
            .bind(password_hash)
            .bind(created_at)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                    if db_err.message().contains("users.email") {
                        AppError::DuplicateUser("Email already registered".to_string())
                    } else {
                        AppError::DuplicateUser("Username already registered".to_string())
                    }
                }
                other => AppError::Database(other.to_string()),
            })
    }

    /// Get a user by ID.
    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = ?");

        sqlx::query_as::<_, User>(&sql)
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether a user with this ID exists.
    pub async fn user_exists(&self, user_id: i64) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM users WHERE id = ?)")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map(|found| found != 0)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether the username is taken.
    pub async fn username_taken(&self, username: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM users WHERE username = ?)")
            .bind(username)
            .fetch_one(&self.pool)
            .await
            .map(|found| found != 0)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Whether the email is taken.
    pub async fn email_taken(&self, email: &str) -> Result<bool, AppError> {
        sqlx::query_scalar::<_, i64>("SELECT EXISTS(SELECT 1 FROM users WHERE email = ?)")
            .bind(email)
            .fetch_one(&self.pool)
            .await
            .map(|found| found != 0)
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// List users ordered by ID.
    pub async fn list_users(&self, skip: u32, limit: u32) -> Result<Vec<User>, AppError> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users ORDER BY id LIMIT ? OFFSET ?");

        sqlx::query_as::<_, User>(&sql)
            .bind(i64::from(limit))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Delete a user. Their calculations go with them via `ON DELETE CASCADE`.
    ///
    /// Returns `false` if no such user existed.
    pub async fn delete_user(&self, user_id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM users WHERE id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }

    // ─── Calculation Operations ──────────────────────────────────

    /// Insert a calculation row for `user_id` in a single statement.
    pub async fn insert_calculation(
        &self,
        user_id: i64,
        evaluation: &Evaluation,
        timestamp: DateTime<Utc>,
    ) -> Result<Calculation, AppError> {
        let sql = format!(
            "INSERT INTO calculations (operation, operand_a, operand_b, result, timestamp, user_id) \
             VALUES (?, ?, ?, ?, ?, ?) RETURNING {CALCULATION_COLUMNS}"
        );

        sqlx::query_as::<_, Calculation>(&sql)
            .bind(evaluation.operation().as_str())
            .bind(evaluation.operand_a())
            .bind(evaluation.operand_b())
            .bind(evaluation.result())
            .bind(timestamp)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                // User deleted between the existence check and the insert.
                sqlx::Error::Database(db_err) if db_err.is_foreign_key_violation() => {
                    AppError::UserNotFound(user_id)
                }
                other => AppError::Database(other.to_string()),
            })
    }

    /// Get a calculation by ID.
    pub async fn get_calculation(&self, calculation_id: i64) -> Result<Option<Calculation>, AppError> {
        let sql = format!("SELECT {CALCULATION_COLUMNS} FROM calculations WHERE id = ?");

        sqlx::query_as::<_, Calculation>(&sql)
            .bind(calculation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Get a user's calculations in insertion order. `None` means no limit.
    pub async fn get_calculations_for_user(
        &self,
        user_id: i64,
        skip: u32,
        limit: Option<u32>,
    ) -> Result<Vec<Calculation>, AppError> {
        let sql = format!(
            "SELECT {CALCULATION_COLUMNS} FROM calculations \
             WHERE user_id = ? ORDER BY id LIMIT ? OFFSET ?"
        );

        sqlx::query_as::<_, Calculation>(&sql)
            .bind(user_id)
            // SQLite treats a negative LIMIT as unbounded.
            .bind(limit.map(i64::from).unwrap_or(-1))
            .bind(i64::from(skip))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}
