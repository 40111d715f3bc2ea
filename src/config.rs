// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Loaded once at startup and handed to the components that need it; nothing
//! reads the environment after that.

use std::env;
use std::str::FromStr;

/// Argon2 work factor used when hashing user credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHashConfig {
    /// Memory cost in KiB
    pub memory_kib: u32,
    /// Number of passes
    pub iterations: u32,
    /// Degree of parallelism
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        // OWASP baseline for Argon2id.
        Self {
            memory_kib: 19 * 1024,
            iterations: 2,
            parallelism: 1,
        }
    }
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// sqlx connection string, e.g. `sqlite://calculator.db?mode=rwc`
    pub database_url: String,
    /// Upper bound on pooled connections
    pub database_max_connections: u32,
    /// Server port
    pub port: u16,
    /// Frontend origin allowed by CORS
    pub frontend_url: String,
    /// Credential hashing work factor
    pub password_hash: PasswordHashConfig,
}

impl Config {
    /// Load configuration from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PasswordHashConfig::default();

        Ok(Self {
            database_url: lookup("DATABASE_URL")
                .map(|v| v.trim().to_string())
                .unwrap_or_else(|| "sqlite://calculator.db?mode=rwc".to_string()),
            database_max_connections: parse_or(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            port: parse_or(&lookup, "PORT", 8000)?,
            frontend_url: lookup("FRONTEND_URL")
                .unwrap_or_else(|| "http://localhost:8000".to_string()),
            password_hash: PasswordHashConfig {
                memory_kib: parse_or(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
                iterations: parse_or(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
                parallelism: parse_or(
                    &lookup,
                    "PASSWORD_HASH_PARALLELISM",
                    defaults.parallelism,
                )?,
            },
        })
    }

    /// Config for tests: in-memory database and a cheap hash work factor.
    pub fn test_default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            database_max_connections: 1,
            port: 8000,
            frontend_url: "http://localhost:8000".to_string(),
            password_hash: PasswordHashConfig {
                memory_kib: 8,
                iterations: 1,
                parallelism: 1,
            },
        }
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) => raw.trim().parse().map_err(|_| ConfigError::Invalid {
            key,
            value: raw.clone(),
        }),
        None => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}
