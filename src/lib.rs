// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Calc-History: a small calculator service with per-user history
//!
//! This crate provides the HTTP API for evaluating arithmetic operations
//! and recording them against registered users.

pub mod calculator;
pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use db::Database;
use services::{Argon2Hasher, HistoryRecorder, UserRegistry};
use std::sync::Arc;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub db: Database,
    pub users: UserRegistry,
    pub history: HistoryRecorder,
}

impl AppState {
    /// Wire the services over an open database.
    pub fn new(config: Config, db: Database) -> Result<Self, services::HashError> {
        let hasher = Arc::new(Argon2Hasher::new(&config.password_hash)?);

        Ok(Self {
            users: UserRegistry::new(db.clone(), hasher),
            history: HistoryRecorder::new(db.clone()),
            config,
            db,
        })
    }
}
