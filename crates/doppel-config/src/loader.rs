// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./doppel.toml` > `~/.config/doppel/doppel.toml` > `/etc/doppel/doppel.toml`
//! with environment variable overrides via `DOPPEL_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::DoppelConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/doppel/doppel.toml` (system-wide)
/// 3. `~/.config/doppel/doppel.toml` (user XDG config)
/// 4. `./doppel.toml` (local directory)
/// 5. `DOPPEL_*` environment variables
pub fn load_config() -> Result<DoppelConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DoppelConfig::default()))
        .merge(Toml::file("/etc/doppel/doppel.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("doppel/doppel.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("doppel.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup, no env).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<DoppelConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DoppelConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<DoppelConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(DoppelConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `DOPPEL_ANTHROPIC_API_KEY` must map to
/// `anthropic.api_key`, not `anthropic.api.key`.
fn env_provider() -> Env {
    Env::prefixed("DOPPEL_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        // Example: DOPPEL_ANTHROPIC_API_KEY -> "anthropic_api_key"
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("agent_", "agent.", 1)
            .replacen("server_", "server.", 1)
            .replacen("anthropic_", "anthropic.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("limits_", "limits.", 1);
        mapped.into()
    })
}
