// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod history;
pub mod password;
pub mod users;

pub use history::HistoryRecorder;
pub use password::{Argon2Hasher, CredentialHasher, HashError};
pub use users::UserRegistry;
