// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User registration and lookup.

use crate::db::Database;
use crate::error::{AppError, Result};
use crate::models::{NewUser, User};
use crate::services::password::CredentialHasher;
use std::sync::Arc;

/// Creates, fetches and deletes users.
///
/// Only the credential digest ever reaches the database.
#[derive(Clone)]
pub struct UserRegistry {
    db: Database,
    hasher: Arc<dyn CredentialHasher>,
}

impl UserRegistry {
    pub fn new(db: Database, hasher: Arc<dyn CredentialHasher>) -> Self {
        Self { db, hasher }
    }

    /// Register a new user.
    pub async fn create(&self, new_user: NewUser) -> Result<User> {
        new_user.check().map_err(AppError::BadRequest)?;

        if self.db.username_taken(&new_user.username).await? {
            return Err(AppError::DuplicateUser(
                "Username already registered".to_string(),
            ));
        }
        if self.db.email_taken(&new_user.email).await? {
            return Err(AppError::DuplicateUser("Email already registered".to_string()));
        }

        // Hashing is CPU-bound; run it off the async workers.
        let hasher = Arc::clone(&self.hasher);
        let password = new_user.password;
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(anyhow::Error::from)?
            .map_err(anyhow::Error::from)?;

        let user = self
            .db
            .insert_user(
                &new_user.username,
                &new_user.email,
                &password_hash,
                chrono::Utc::now(),
            )
            .await?;

        tracing::info!(user_id = user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Fetch a user by ID.
    pub async fn get(&self, user_id: i64) -> Result<User> {
        self.db
            .get_user(user_id)
            .await?
            .ok_or(AppError::UserNotFound(user_id))
    }

    /// List users ordered by ID.
    pub async fn list(&self, skip: u32, limit: u32) -> Result<Vec<User>> {
        self.db.list_users(skip, limit).await
    }

    /// Delete a user and, by cascade, their calculation history.
    pub async fn delete(&self, user_id: i64) -> Result<()> {
        if !self.db.delete_user(user_id).await? {
            return Err(AppError::UserNotFound(user_id));
        }
        tracing::info!(user_id, "User deleted");
        Ok(())
    }
}
