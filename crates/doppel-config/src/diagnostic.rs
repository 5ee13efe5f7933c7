// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration error diagnostics rendered through miette.

use miette::Diagnostic;
use thiserror::Error;

/// A configuration error with diagnostic information.
#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    /// A validation error for a config value.
    #[error("validation error: {message}")]
    #[diagnostic(code(doppel::config::validation))]
    Validation {
        /// Description of the validation failure.
        message: String,
    },

    /// Catch-all for deserialization and other configuration errors.
    #[error("configuration error: {0}")]
    #[diagnostic(code(doppel::config::other))]
    Other(String),
}

/// Render collected configuration errors to stderr as miette reports.
pub fn render_errors(errors: Vec<ConfigError>) {
    for error in errors {
        eprintln!("{:?}", miette::Report::new(error));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_display() {
        let err = ConfigError::Validation {
            message: "server.port must be nonzero".into(),
        };
        assert_eq!(
            err.to_string(),
            "validation error: server.port must be nonzero"
        );
    }
}
