// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Doppel digital-twin service.
//!
//! Exposes the service descriptor, health, and chat endpoints, validates
//! inbound requests, and maps pipeline errors to HTTP statuses.

pub mod handlers;
pub mod server;
pub mod validate;

pub use server::{GatewayState, ServerConfig, router, start_server};
