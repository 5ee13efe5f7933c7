// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-client session-count limiting.

use std::collections::HashSet;

use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

use doppel_core::DoppelError;

/// Tracks which session ids each client address has originated and caps
/// how many distinct ones it may create.
///
/// The set never expires within the process lifetime; a restart resets
/// it. Re-using an already-counted session id always passes, regardless
/// of the ceiling.
pub struct ClientSessionTracker {
    max_sessions: usize,
    sessions: DashMap<String, HashSet<Uuid>>,
}

impl ClientSessionTracker {
    /// Creates a tracker allowing `max_sessions` distinct sessions per client.
    pub fn new(max_sessions: usize) -> Self {
        Self {
            max_sessions,
            sessions: DashMap::new(),
        }
    }

    /// Registers the session under the client, rejecting only when the
    /// session is new to this client and the client is already at the cap.
    pub fn register(&self, client: &str, session_id: &Uuid) -> Result<(), DoppelError> {
        let mut entry = self.sessions.entry(client.to_string()).or_default();

        if entry.contains(session_id) {
            return Ok(());
        }

        if entry.len() >= self.max_sessions {
            warn!(
                client,
                %session_id,
                max = self.max_sessions,
                "client session limit exceeded"
            );
            return Err(DoppelError::SessionLimit {
                message: "Too many sessions from your address.".to_string(),
            });
        }

        entry.insert(*session_id);
        Ok(())
    }
}
