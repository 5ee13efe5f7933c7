// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The chat pipeline: the fixed per-request sequence around one
//! completion call.
//!
//! Sequence: resolve session id -> jailbreak scan -> rate limit -> client
//! session cap -> load conversation -> expiry reset -> budget gate ->
//! assemble corpus -> completion call (bounded by timeout) -> budget
//! accounting -> append turns -> save. Any guard rejection short-circuits
//! with no persistence side effects.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::{error, info, warn};
use uuid::Uuid;

use doppel_core::{CompletionProvider, DoppelError, Role, Turn};
use doppel_docs::DocumentAssembler;
use doppel_guard::{Guards, conversation_expired, detect_jailbreak, estimate_exchange_tokens};
use doppel_storage::ConversationStore;

use crate::prompt;

/// A completed exchange.
#[derive(Debug, Clone)]
pub struct ChatOutcome {
    /// The assistant's reply.
    pub response: String,
    /// The session the exchange was recorded under (possibly newly
    /// generated).
    pub session_id: Uuid,
}

/// Orchestrates one chat exchange end to end.
pub struct ChatService {
    guards: Guards,
    conversations: ConversationStore,
    documents: DocumentAssembler,
    provider: Arc<dyn CompletionProvider>,
    base_prompt: String,
    completion_timeout: Duration,
}

impl ChatService {
    /// Wires the pipeline from its collaborators.
    pub fn new(
        guards: Guards,
        conversations: ConversationStore,
        documents: DocumentAssembler,
        provider: Arc<dyn CompletionProvider>,
        base_prompt: String,
        completion_timeout: Duration,
    ) -> Self {
        Self {
            guards,
            conversations,
            documents,
            provider,
            base_prompt,
            completion_timeout,
        }
    }

    /// The model identifier responses are generated with.
    pub fn model(&self) -> &str {
        self.provider.model()
    }

    /// Handles one inbound chat message.
    pub async fn handle(
        &self,
        message: &str,
        session_id: Option<Uuid>,
        client: &str,
    ) -> Result<ChatOutcome, DoppelError> {
        let session_id = session_id.unwrap_or_else(Uuid::new_v4);

        if detect_jailbreak(message) {
            warn!(%session_id, client, "jailbreak attempt detected");
            return Err(DoppelError::InvalidRequest {
                message: "Invalid request detected.".to_string(),
            });
        }

        self.guards.rate.check_and_record(&session_id)?;
        self.guards.clients.register(client, &session_id)?;

        info!(
            event = "chat_request",
            %session_id,
            client,
            message_length = message.len(),
        );

        let mut history = self.conversations.load(&session_id).await;

        if conversation_expired(&history, self.guards.session_max_age(), Utc::now()) {
            info!(%session_id, "conversation expired, resetting session");
            self.conversations.delete(&session_id).await;
            self.guards.budget.reset(&session_id);
            history.clear();
        }

        // Pre-call budget gate: checks without charging.
        self.guards.budget.consume(&session_id, 0)?;

        let corpus = self.documents.assemble().await;
        let system = prompt::build_system(&self.base_prompt, &corpus.text);
        let messages = prompt::build_messages(&history, message);

        let response = match tokio::time::timeout(
            self.completion_timeout,
            self.provider.complete(&system, &messages),
        )
        .await
        {
            Ok(Ok(text)) => text,
            Ok(Err(e)) => {
                error!(%session_id, error = %e, "completion call failed");
                return Err(e);
            }
            Err(_) => {
                error!(
                    %session_id,
                    timeout_secs = self.completion_timeout.as_secs(),
                    "completion call timed out"
                );
                return Err(DoppelError::Timeout {
                    duration: self.completion_timeout,
                });
            }
        };

        // Post-call accounting with the real cost. The gate already passed
        // for this request, so a rejection here means a concurrent request
        // crossed the ceiling first; the usage is logged either way and the
        // next request is gated.
        let cost = estimate_exchange_tokens(message, &response);
        if let Err(e) = self.guards.budget.consume(&session_id, cost) {
            warn!(%session_id, cost, error = %e, "budget crossed during completion");
        }

        let now = Utc::now();
        history.push(Turn::new(Role::User, message, now));
        history.push(Turn::new(Role::Assistant, response.clone(), now));
        self.conversations.save(&session_id, &history).await;

        info!(
            event = "chat_response",
            %session_id,
            response_length = response.len(),
            estimated_tokens = cost,
        );

        Ok(ChatOutcome {
            response,
            session_id,
        })
    }
}
