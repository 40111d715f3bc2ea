// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod calculation;
pub mod user;

pub use calculation::Calculation;
pub use user::{NewUser, User};
