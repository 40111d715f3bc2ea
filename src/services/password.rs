// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Credential hashing.

use crate::config::PasswordHashConfig;
use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand_core::OsRng;

/// One-way credential hashing capability.
///
/// The user registry only ever sees this trait, so swapping the algorithm
/// does not touch registration logic.
pub trait CredentialHasher: Send + Sync {
    /// Hash a secret with a fresh random salt.
    fn hash(&self, secret: &str) -> Result<String, HashError>;

    /// Check a secret against a digest produced by [`CredentialHasher::hash`].
    fn verify(&self, secret: &str, digest: &str) -> Result<bool, HashError>;
}

/// Argon2id hasher with a configurable work factor.
#[derive(Debug, Clone)]
pub struct Argon2Hasher {
    params: Params,
}

impl Argon2Hasher {
    pub fn new(config: &PasswordHashConfig) -> Result<Self, HashError> {
        let params = Params::new(
            config.memory_kib,
            config.iterations,
            config.parallelism,
            None,
        )
        .map_err(|e| HashError::Params(e.to_string()))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }
}

impl CredentialHasher for Argon2Hasher {
    fn hash(&self, secret: &str) -> Result<String, HashError> {
        let salt = SaltString::generate(&mut OsRng);
        let digest = self
            .argon2()
            .hash_password(secret.as_bytes(), &salt)
            .map_err(|e| HashError::Hash(e.to_string()))?;
        Ok(digest.to_string())
    }

    fn verify(&self, secret: &str, digest: &str) -> Result<bool, HashError> {
        // Parameters are read back from the PHC string, not from `self`.
        let parsed = PasswordHash::new(digest).map_err(|e| HashError::Digest(e.to_string()))?;
        Ok(self
            .argon2()
            .verify_password(secret.as_bytes(), &parsed)
            .is_ok())
    }
}

/// Errors from credential hashing.
#[derive(Debug, thiserror::Error)]
pub enum HashError {
    #[error("Invalid hashing parameters: {0}")]
    Params(String),

    #[error("Password hashing failed: {0}")]
    Hash(String),

    #[error("Malformed password digest: {0}")]
    Digest(String),
}
