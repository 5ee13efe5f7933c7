// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for the Doppel service.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup.

use serde::{Deserialize, Serialize};

/// Top-level Doppel configuration.
///
/// Loaded from TOML files following the XDG hierarchy, with environment
/// variable overrides. All sections are optional and default to sensible
/// values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DoppelConfig {
    /// Twin identity and logging settings.
    #[serde(default)]
    pub agent: AgentConfig,

    /// HTTP server bind settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Anthropic API settings.
    #[serde(default)]
    pub anthropic: AnthropicConfig,

    /// Conversation and document storage settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Abuse-control ceilings.
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Twin identity and logging configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AgentConfig {
    /// Display name of the twin.
    #[serde(default = "default_agent_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Deployment environment label reported by /health.
    #[serde(default = "default_environment")]
    pub environment: String,

    /// Inline persona prompt string. Overridden by `system_prompt_file` if both set.
    #[serde(default)]
    pub system_prompt: Option<String>,

    /// Path to a file containing the persona prompt.
    /// Takes precedence over `system_prompt` if both are set.
    #[serde(default)]
    pub system_prompt_file: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            name: default_agent_name(),
            log_level: default_log_level(),
            environment: default_environment(),
            system_prompt: None,
            system_prompt_file: None,
        }
    }
}

fn default_agent_name() -> String {
    "doppel".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

/// HTTP server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Host address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

/// Anthropic API configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AnthropicConfig {
    /// Anthropic API key. `None` requires the DOPPEL_ANTHROPIC_API_KEY
    /// environment variable.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model to use for completion requests.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Maximum tokens to generate per response.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Anthropic API version string.
    #[serde(default = "default_api_version")]
    pub api_version: String,

    /// Outbound request timeout. On expiry the request surfaces a generic
    /// internal error and nothing is persisted.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl Default for AnthropicConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            default_model: default_model(),
            max_tokens: default_max_tokens(),
            api_version: default_api_version(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

fn default_model() -> String {
    "claude-sonnet-4-20250514".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_api_version() -> String {
    "2023-06-01".to_string()
}

fn default_request_timeout_secs() -> u64 {
    60
}

/// Storage backend configuration.
///
/// `backend` selects where conversation blobs live for the lifetime of the
/// process; the document assembler always tries the remote store first
/// (when configured) and falls back to the local directory per document.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Conversation backend: "local" or "remote".
    #[serde(default = "default_backend")]
    pub backend: String,

    /// Directory for local blobs (conversations and profile documents).
    #[serde(default = "default_local_dir")]
    pub local_dir: String,

    /// Remote object store endpoint, e.g. "https://objects.example.com".
    #[serde(default)]
    pub endpoint: Option<String>,

    /// Remote bucket name.
    #[serde(default)]
    pub bucket: Option<String>,

    /// Optional bearer token for the remote store.
    #[serde(default)]
    pub token: Option<String>,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: default_backend(),
            local_dir: default_local_dir(),
            endpoint: None,
            bucket: None,
            token: None,
        }
    }
}

fn default_backend() -> String {
    "local".to_string()
}

fn default_local_dir() -> String {
    "memory".to_string()
}

/// Abuse-control ceilings applied to every /chat request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LimitsConfig {
    /// Requests allowed per session within the sliding rate window.
    #[serde(default = "default_max_requests_per_session")]
    pub max_requests_per_session: usize,

    /// Width of the sliding rate window in seconds.
    #[serde(default = "default_rate_window_secs")]
    pub rate_window_secs: u64,

    /// Distinct sessions a single client address may originate.
    #[serde(default = "default_max_sessions_per_client")]
    pub max_sessions_per_client: usize,

    /// Age after which a stored conversation is expired and reset.
    #[serde(default = "default_session_max_age_secs")]
    pub session_max_age_secs: u64,

    /// Cumulative estimated-token ceiling per session.
    #[serde(default = "default_session_token_budget")]
    pub session_token_budget: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_requests_per_session: default_max_requests_per_session(),
            rate_window_secs: default_rate_window_secs(),
            max_sessions_per_client: default_max_sessions_per_client(),
            session_max_age_secs: default_session_max_age_secs(),
            session_token_budget: default_session_token_budget(),
        }
    }
}

fn default_max_requests_per_session() -> usize {
    20
}

fn default_rate_window_secs() -> u64 {
    3600
}

fn default_max_sessions_per_client() -> usize {
    5
}

fn default_session_max_age_secs() -> u64 {
    86400
}

fn default_session_token_budget() -> u64 {
    10000
}
