// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Calc-History API Server
//!
//! Serves the calculator frontend and the arithmetic, user and history
//! endpoints over a SQLite database.

use anyhow::Context;
use calc_history::{config::Config, db::Database, AppState};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize structured JSON logging
    init_logging()?;

    // Load configuration from environment
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!(port = config.port, "Starting Calc-History API");

    // Open the database and apply migrations
    let db = Database::connect(&config.database_url, config.database_max_connections)
        .await
        .context("Failed to open database")?;

    let state = Arc::new(
        AppState::new(config.clone(), db).context("Invalid password hash settings")?,
    );
    tracing::info!(
        memory_kib = config.password_hash.memory_kib,
        iterations = config.password_hash.iterations,
        "Password hasher initialized"
    );

    // Build router
    let app = calc_history::routes::create_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(address = %addr, "Server listening");

    axum::serve(listener, app).await?;
    Ok(())
}

/// Initialize structured JSON logging.
fn init_logging() -> anyhow::Result<()> {
    let format = tracing_subscriber::fmt::layer()
        .json()
        .with_target(false)
        .with_current_span(true)
        .flatten_event(true);

    tracing_subscriber::registry()
        .with(
            EnvFilter::from_default_env()
                .add_directive("calc_history=debug".parse()?)
                .add_directive("info".parse()?),
        )
        .with(format)
        .init();
    Ok(())
}
