// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation persistence on top of an [`ObjectStore`].
//!
//! Conversations are JSON arrays of turns under a per-session key. Reads
//! and writes never surface storage failures to the request path: a
//! conversation that cannot be read is an empty conversation, and a
//! failed write or delete is logged and dropped.

use std::sync::Arc;

use tracing::{debug, error, info, warn};
use uuid::Uuid;

use doppel_core::Turn;

use crate::store::ObjectStore;

/// Stored conversations are truncated to this many most-recent turns on
/// every save.
pub const MAX_STORED_TURNS: usize = 100;

/// Persists per-session conversations as JSON blobs.
#[derive(Clone)]
pub struct ConversationStore {
    store: Arc<dyn ObjectStore>,
}

impl ConversationStore {
    /// Creates a conversation store over the backend chosen at startup.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self { store }
    }

    /// The backend label ("remote" or "local").
    pub fn backend_label(&self) -> &'static str {
        self.store.label()
    }

    /// Storage key for a session's conversation blob.
    pub fn conversation_key(session_id: &Uuid) -> String {
        format!("conversations/{session_id}.json")
    }

    /// Loads a session's turns, oldest first.
    ///
    /// Absent conversations, read failures, and unparseable blobs all
    /// yield an empty history; nothing here errors to the caller.
    pub async fn load(&self, session_id: &Uuid) -> Vec<Turn> {
        let key = Self::conversation_key(session_id);
        match self.store.get(&key).await {
            Ok(Some(bytes)) => match serde_json::from_slice::<Vec<Turn>>(&bytes) {
                Ok(turns) => turns,
                Err(e) => {
                    warn!(%session_id, error = %e, "stored conversation is unparseable, treating as empty");
                    Vec::new()
                }
            },
            Ok(None) => {
                debug!(%session_id, "no existing conversation");
                Vec::new()
            }
            Err(e) => {
                warn!(%session_id, error = %e, "conversation load failed, treating as empty");
                Vec::new()
            }
        }
    }

    /// Saves a session's turns, keeping only the most recent
    /// [`MAX_STORED_TURNS`]. Write failures are logged, never raised.
    pub async fn save(&self, session_id: &Uuid, turns: &[Turn]) {
        let window = if turns.len() > MAX_STORED_TURNS {
            &turns[turns.len() - MAX_STORED_TURNS..]
        } else {
            turns
        };

        let bytes = match serde_json::to_vec_pretty(window) {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(%session_id, error = %e, "conversation serialization failed");
                return;
            }
        };

        let key = Self::conversation_key(session_id);
        match self.store.put(&key, &bytes).await {
            Ok(()) => info!(%session_id, turns = window.len(), "saved conversation"),
            Err(e) => error!(%session_id, error = %e, "conversation save failed"),
        }
    }

    /// Best-effort removal of a session's stored conversation.
    pub async fn delete(&self, session_id: &Uuid) {
        let key = Self::conversation_key(session_id);
        if let Err(e) = self.store.delete(&key).await {
            warn!(%session_id, error = %e, "conversation delete failed");
        }
    }
}
