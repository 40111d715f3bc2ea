// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Middleware and request extractors (caller identification, security headers).

pub mod caller;
pub mod security;

pub use caller::CallerId;
