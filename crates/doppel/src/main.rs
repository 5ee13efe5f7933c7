// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Doppel - a digital-twin profile chatbot service.
//!
//! This is the binary entry point for the Doppel server.

#[cfg(not(target_env = "msvc"))]
use tikv_jemallocator::Jemalloc;

#[cfg(not(target_env = "msvc"))]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

use clap::{Parser, Subcommand};

mod serve;

/// Doppel - a digital-twin profile chatbot service.
#[derive(Parser, Debug)]
#[command(name = "doppel", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Start the Doppel chat server.
    Serve,
    /// Print the resolved configuration.
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Load and validate configuration at startup.
    let config = match doppel_config::load_and_validate() {
        Ok(config) => config,
        Err(errors) => {
            doppel_config::render_errors(errors);
            std::process::exit(1);
        }
    };

    match cli.command {
        Some(Commands::Serve) => {
            if let Err(e) = serve::run_serve(config).await {
                eprintln!("doppel serve failed: {e}");
                std::process::exit(1);
            }
        }
        Some(Commands::Config) => {
            print_resolved_config(&config);
        }
        None => {
            println!("doppel: use --help for available commands");
        }
    }
}

/// Prints the resolved configuration, with secrets elided.
fn print_resolved_config(config: &doppel_config::DoppelConfig) {
    println!("agent.name = {}", config.agent.name);
    println!("agent.log_level = {}", config.agent.log_level);
    println!("agent.environment = {}", config.agent.environment);
    println!("server.host = {}", config.server.host);
    println!("server.port = {}", config.server.port);
    println!(
        "anthropic.api_key = {}",
        if config.anthropic.api_key.is_some() {
            "<set>"
        } else {
            "<unset>"
        }
    );
    println!("anthropic.default_model = {}", config.anthropic.default_model);
    println!("anthropic.max_tokens = {}", config.anthropic.max_tokens);
    println!(
        "anthropic.request_timeout_secs = {}",
        config.anthropic.request_timeout_secs
    );
    println!("storage.backend = {}", config.storage.backend);
    println!("storage.local_dir = {}", config.storage.local_dir);
    println!(
        "limits.max_requests_per_session = {}",
        config.limits.max_requests_per_session
    );
    println!("limits.rate_window_secs = {}", config.limits.rate_window_secs);
    println!(
        "limits.max_sessions_per_client = {}",
        config.limits.max_sessions_per_client
    );
    println!(
        "limits.session_max_age_secs = {}",
        config.limits.session_max_age_secs
    );
    println!(
        "limits.session_token_budget = {}",
        config.limits.session_token_budget
    );
}

#[cfg(test)]
mod tests {
    #[test]
    #[cfg(not(target_env = "msvc"))]
    fn jemalloc_is_active() {
        // Verify jemalloc is the global allocator by advancing the epoch.
        // Only jemalloc supports this -- the system allocator would fail.
        use tikv_jemalloc_ctl::{epoch, stats};
        epoch::advance().unwrap();
        let allocated = stats::allocated::read().unwrap();
        assert!(allocated > 0, "jemalloc should report non-zero allocation");
    }

    #[test]
    fn binary_loads_config_defaults() {
        // Verify config loads with defaults (no config file needed).
        let config =
            doppel_config::load_and_validate().expect("default config should be valid");
        assert_eq!(config.agent.name, "doppel");
    }
}
