// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! System prompt and model-facing message assembly.

use tracing::info;

use doppel_config::model::AgentConfig;
use doppel_core::{ChatMessage, Role, Turn};

/// Default persona prompt when none is configured.
const DEFAULT_BASE_PROMPT: &str = "You are an AI assistant representing a professional based \
on their profile documents. Answer questions about their experience, skills, projects, and \
background in a helpful and professional manner. Keep responses concise and relevant. If asked \
about something not covered by the profile, politely say you don't have that information.";

/// How many persisted turns (10 exchanges) accompany each completion call.
pub const HISTORY_WINDOW_TURNS: usize = 20;

/// Resolves the persona base prompt: file > inline > default.
pub async fn resolve_base_prompt(config: &AgentConfig) -> String {
    if let Some(ref file_path) = config.system_prompt_file {
        match tokio::fs::read_to_string(file_path).await {
            Ok(content) => {
                let trimmed = content.trim().to_string();
                if !trimmed.is_empty() {
                    info!(path = file_path.as_str(), "loaded persona prompt from file");
                    return trimmed;
                }
            }
            Err(e) => {
                tracing::warn!(
                    path = file_path.as_str(),
                    error = %e,
                    "failed to read persona prompt file, falling back"
                );
            }
        }
    }

    if let Some(ref prompt) = config.system_prompt
        && !prompt.is_empty()
    {
        return prompt.clone();
    }

    DEFAULT_BASE_PROMPT.to_string()
}

/// Combines the persona prompt with the assembled document corpus into
/// the system instruction for one completion call.
pub fn build_system(base_prompt: &str, corpus: &str) -> String {
    format!("{base_prompt}\n\nProfile Context:\n{corpus}")
}

/// Builds the model-facing message sequence: the trailing
/// [`HISTORY_WINDOW_TURNS`] persisted turns followed by the new user
/// message.
pub fn build_messages(history: &[Turn], user_message: &str) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(HISTORY_WINDOW_TURNS);
    let mut messages: Vec<ChatMessage> =
        history[start..].iter().map(ChatMessage::from).collect();
    messages.push(ChatMessage {
        role: Role::User,
        content: user_message.to_string(),
    });
    messages
}
