// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Chat orchestration for the Doppel service.
//!
//! [`ChatService`] runs the fixed per-request sequence -- guard chain,
//! conversation load, corpus assembly, completion call, persistence --
//! and is the only place those steps are ordered.

pub mod prompt;
pub mod service;

pub use prompt::HISTORY_WINDOW_TURNS;
pub use service::{ChatOutcome, ChatService};
