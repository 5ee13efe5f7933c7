// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `doppel serve` command implementation.
//!
//! Wires the storage backends, document assembler, Anthropic provider,
//! guard chain, and chat pipeline, then starts the HTTP gateway.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::EnvFilter;

use doppel_anthropic::AnthropicProvider;
use doppel_chat::{ChatService, prompt};
use doppel_config::DoppelConfig;
use doppel_core::DoppelError;
use doppel_docs::DocumentAssembler;
use doppel_gateway::{GatewayState, ServerConfig, start_server};
use doppel_guard::Guards;
use doppel_storage::{ConversationStore, FsObjectStore, HttpObjectStore, ObjectStore};

/// Runs the `doppel serve` command.
pub async fn run_serve(config: DoppelConfig) -> Result<(), DoppelError> {
    init_tracing(&config.agent.log_level);

    info!(
        environment = %config.agent.environment,
        model = %config.anthropic.default_model,
        "starting doppel serve"
    );

    // The remote store exists only when an endpoint and bucket are configured.
    let remote: Option<Arc<dyn ObjectStore>> =
        match (&config.storage.endpoint, &config.storage.bucket) {
            (Some(endpoint), Some(bucket)) => Some(Arc::new(HttpObjectStore::new(
                endpoint,
                bucket,
                config.storage.token.as_deref(),
            )?)),
            _ => None,
        };
    let local: Arc<dyn ObjectStore> = Arc::new(FsObjectStore::new(&config.storage.local_dir));

    // Conversation backend is selected once at startup; no per-request fallback.
    let conversation_backend: Arc<dyn ObjectStore> = match config.storage.backend.as_str() {
        "remote" => remote.clone().ok_or_else(|| {
            DoppelError::Config(
                "storage.backend = \"remote\" requires storage.endpoint and storage.bucket"
                    .to_string(),
            )
        })?,
        _ => local.clone(),
    };
    let conversations = ConversationStore::new(conversation_backend);
    info!(backend = conversations.backend_label(), "conversation storage selected");

    // Documents try the remote store first, then the local directory.
    let mut document_backends: Vec<Arc<dyn ObjectStore>> = Vec::new();
    if let Some(remote) = remote {
        document_backends.push(remote);
    }
    document_backends.push(local);
    let documents = DocumentAssembler::new(document_backends);

    let provider = Arc::new(AnthropicProvider::new(&config.anthropic)?);
    let guards = Guards::new(&config.limits);
    let base_prompt = prompt::resolve_base_prompt(&config.agent).await;

    let chat = ChatService::new(
        guards,
        conversations,
        documents.clone(),
        provider,
        base_prompt,
        Duration::from_secs(config.anthropic.request_timeout_secs),
    );

    let state = GatewayState {
        chat: Arc::new(chat),
        documents,
        environment: config.agent.environment.clone(),
    };

    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };
    start_server(&server_config, state).await
}

/// Initializes the tracing subscriber. `RUST_LOG` wins over the
/// configured level when set.
fn init_tracing(log_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}
