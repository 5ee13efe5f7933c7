// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Doppel digital-twin service.
//!
//! Provides the error type, the conversation domain types, and the
//! completion-provider trait implemented by provider crates.

pub mod error;
pub mod provider;
pub mod types;

pub use error::DoppelError;
pub use provider::CompletionProvider;
pub use types::{ChatMessage, Role, Turn};
