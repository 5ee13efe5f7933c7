// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage backends for the Doppel service.
//!
//! Provides the [`ObjectStore`] trait with filesystem and remote HTTP
//! implementations, and the [`ConversationStore`] that persists per-session
//! conversation blobs on top of whichever backend was selected at startup.

pub mod conversation;
pub mod fs;
pub mod remote;
pub mod store;

pub use conversation::{ConversationStore, MAX_STORED_TURNS};
pub use fs::FsObjectStore;
pub use remote::HttpObjectStore;
pub use store::ObjectStore;
