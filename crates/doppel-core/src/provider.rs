// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The seam between the chat pipeline and the hosted completion service.

use async_trait::async_trait;

use crate::error::DoppelError;
use crate::types::ChatMessage;

/// A hosted LLM completion service.
///
/// Implementations own the transport, authentication, sampling parameters,
/// and output-token bound; callers supply only the system text and the
/// role-tagged message sequence and receive the response text.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Requests one completion. Any transport or service failure is
    /// surfaced as [`DoppelError::Provider`]; no retry is performed.
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<String, DoppelError>;

    /// The model identifier requests are issued against.
    fn model(&self) -> &str;
}
