// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! [`CompletionProvider`] implementation over the Anthropic client.

use std::time::Duration;

use async_trait::async_trait;

use doppel_config::model::AnthropicConfig;
use doppel_core::{ChatMessage, CompletionProvider, DoppelError};

use crate::client::AnthropicClient;
use crate::types::{ApiMessage, MessageRequest};

/// Fixed sampling parameters for twin responses.
const TEMPERATURE: f32 = 0.7;
const TOP_P: f32 = 0.9;

/// Anthropic-backed completion provider with fixed sampling parameters
/// and the configured output-token bound.
#[derive(Debug, Clone)]
pub struct AnthropicProvider {
    client: AnthropicClient,
    model: String,
    max_tokens: u32,
}

impl AnthropicProvider {
    /// Builds the provider from configuration. Requires an API key.
    pub fn new(config: &AnthropicConfig) -> Result<Self, DoppelError> {
        let api_key = config.api_key.as_deref().ok_or_else(|| {
            DoppelError::Config(
                "anthropic.api_key is required (set DOPPEL_ANTHROPIC_API_KEY)".to_string(),
            )
        })?;

        let client = AnthropicClient::new(
            api_key,
            &config.api_version,
            Duration::from_secs(config.request_timeout_secs),
        )?;

        Ok(Self {
            client,
            model: config.default_model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    #[cfg(test)]
    fn with_client(client: AnthropicClient, model: &str, max_tokens: u32) -> Self {
        Self {
            client,
            model: model.to_string(),
            max_tokens,
        }
    }
}

#[async_trait]
impl CompletionProvider for AnthropicProvider {
    async fn complete(
        &self,
        system: &str,
        messages: &[ChatMessage],
    ) -> Result<String, DoppelError> {
        let request = MessageRequest {
            model: self.model.clone(),
            messages: messages
                .iter()
                .map(|m| ApiMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            system: Some(system.to_string()),
            max_tokens: self.max_tokens,
            temperature: Some(TEMPERATURE),
            top_p: Some(TOP_P),
        };

        let response = self.client.complete_message(&request).await?;
        Ok(response.text())
    }

    fn model(&self) -> &str {
        &self.model
    }
}
