// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! User model for storage and API.

use chrono::{DateTime, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

/// User row. Never serialized directly so the hash cannot leak.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    /// Salted one-way hash of the user's password (PHC string)
    pub password_hash: String,
    /// When the user was created
    pub created_at: DateTime<Utc>,
}

/// Registration input.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewUser {
    #[validate(
        length(min = 3, max = 50, message = "must be between 3 and 50 characters"),
        custom(function = "validate_alphanumeric")
    )]
    pub username: String,
    #[validate(email(message = "value is not a valid email address"))]
    pub email: String,
    #[validate(length(min = 6, message = "must be at least 6 characters"))]
    pub password: String,
}

fn validate_alphanumeric(username: &str) -> Result<(), ValidationError> {
    if username.chars().all(|c| c.is_ascii_alphanumeric()) {
        Ok(())
    } else {
        Err(ValidationError::new("alphanumeric").with_message("must be alphanumeric".into()))
    }
}

impl NewUser {
    /// Validate and flatten any failures into one `field: message; ...` line.
    pub fn check(&self) -> Result<(), String> {
        let errors = match self.validate() {
            Ok(()) => return Ok(()),
            Err(errors) => errors,
        };

        let mut messages: Vec<String> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    let message = e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string());
                    format!("{field}: {message}")
                })
            })
            .collect();
        messages.sort();
        Err(messages.join("; "))
    }
}
