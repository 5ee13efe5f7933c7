// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as valid bind addresses and nonzero ceilings.

use crate::diagnostic::ConfigError;
use crate::model::DoppelConfig;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)`
/// with all collected validation errors (does not fail fast).
pub fn validate_config(config: &DoppelConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    let host = config.server.host.trim();
    if host.is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    } else {
        let is_valid_ip = host.parse::<std::net::IpAddr>().is_ok();
        let is_valid_hostname = host
            .chars()
            .all(|c| c.is_alphanumeric() || c == '.' || c == '-' || c == ':');
        if !is_valid_ip && !is_valid_hostname {
            errors.push(ConfigError::Validation {
                message: format!("server.host `{host}` is not a valid IP address or hostname"),
            });
        }
    }

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be nonzero".to_string(),
        });
    }

    match config.storage.backend.as_str() {
        "local" => {
            if config.storage.local_dir.trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: "storage.local_dir must not be empty".to_string(),
                });
            }
        }
        "remote" => {
            if config.storage.endpoint.as_deref().unwrap_or("").trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: "storage.endpoint is required when storage.backend = \"remote\""
                        .to_string(),
                });
            }
            if config.storage.bucket.as_deref().unwrap_or("").trim().is_empty() {
                errors.push(ConfigError::Validation {
                    message: "storage.bucket is required when storage.backend = \"remote\""
                        .to_string(),
                });
            }
        }
        other => {
            errors.push(ConfigError::Validation {
                message: format!(
                    "storage.backend must be \"local\" or \"remote\", got `{other}`"
                ),
            });
        }
    }

    if config.limits.max_requests_per_session == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.max_requests_per_session must be at least 1".to_string(),
        });
    }

    if config.limits.rate_window_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.rate_window_secs must be at least 1".to_string(),
        });
    }

    if config.limits.max_sessions_per_client == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.max_sessions_per_client must be at least 1".to_string(),
        });
    }

    if config.limits.session_max_age_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "limits.session_max_age_secs must be at least 1".to_string(),
        });
    }

    if config.anthropic.max_tokens == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.max_tokens must be at least 1".to_string(),
        });
    }

    if config.anthropic.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "anthropic.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
