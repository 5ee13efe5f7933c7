// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Doppel service.

use thiserror::Error;

/// The primary error type used across all Doppel crates.
///
/// Guard rejections (`InvalidRequest`, `RateLimited`, `SessionLimit`,
/// `BudgetExhausted`) carry only a generic, client-safe message; the
/// detailed reason is emitted to the log at the rejection site.
#[derive(Debug, Error)]
pub enum DoppelError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Storage backend errors (object store I/O, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Completion provider errors (API failure, malformed response).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The request was rejected before reaching the model (validation or
    /// jailbreak detection).
    #[error("invalid request: {message}")]
    InvalidRequest { message: String },

    /// Per-session request rate ceiling reached.
    #[error("rate limited: {message}")]
    RateLimited { message: String },

    /// Per-client session creation ceiling reached.
    #[error("session limit: {message}")]
    SessionLimit { message: String },

    /// Per-session cumulative token budget exhausted.
    #[error("budget exhausted: {message}")]
    BudgetExhausted { message: String },

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl DoppelError {
    /// True for the guard-chain rejections that map to a client-error
    /// status rather than a server fault.
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            DoppelError::InvalidRequest { .. }
                | DoppelError::RateLimited { .. }
                | DoppelError::SessionLimit { .. }
                | DoppelError::BudgetExhausted { .. }
        )
    }
}
