// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration system for the Doppel service.
//!
//! Layered figment loading (defaults, system, XDG, local directory, env)
//! with collected post-deserialization validation.

pub mod diagnostic;
pub mod loader;
pub mod model;
pub mod validation;

pub use diagnostic::{ConfigError, render_errors};
pub use loader::{load_config, load_config_from_path, load_config_from_str};
pub use model::DoppelConfig;
pub use validation::validate_config;

/// Load configuration from the standard hierarchy and validate it.
///
/// All deserialization and validation errors are collected into one list
/// so the operator sees every problem at once.
pub fn load_and_validate() -> Result<DoppelConfig, Vec<ConfigError>> {
    let config = load_config().map_err(|e| vec![ConfigError::Other(e.to_string())])?;
    validate_config(&config)?;
    Ok(config)
}

/// Load configuration from a TOML string and validate it (for tests).
pub fn load_and_validate_str(toml_content: &str) -> Result<DoppelConfig, Vec<ConfigError>> {
    let config =
        load_config_from_str(toml_content).map_err(|e| vec![ConfigError::Other(e.to_string())])?;
    validate_config(&config)?;
    Ok(config)
}
