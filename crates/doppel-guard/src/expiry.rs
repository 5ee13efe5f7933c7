// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session age expiry.

use chrono::{DateTime, TimeDelta, Utc};

use doppel_core::Turn;

/// True when the conversation's first turn is older than `max_age`.
///
/// An empty history is never expired (fail open). This predicate does not
/// abort a request; the caller resets the session transparently by
/// deleting the stored conversation and proceeding with empty history.
pub fn conversation_expired(turns: &[Turn], max_age: TimeDelta, now: DateTime<Utc>) -> bool {
    match turns.first() {
        Some(first) => now - first.timestamp > max_age,
        None => false,
    }
}
