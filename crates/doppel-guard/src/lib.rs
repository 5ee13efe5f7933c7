// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Abuse controls executed in a fixed order before and after the
//! completion call: jailbreak detection, session rate limiting, client
//! session caps, session expiry, and token budgets.
//!
//! All counters are in-memory DashMaps and reset on process restart --
//! an accepted property of the deployment model. Per-key entry access
//! serializes concurrent checks for the same session.

pub mod budget;
pub mod clients;
pub mod expiry;
pub mod jailbreak;
pub mod rate;

pub use budget::{TokenBudget, estimate_exchange_tokens};
pub use clients::ClientSessionTracker;
pub use expiry::conversation_expired;
pub use jailbreak::detect_jailbreak;
pub use rate::SessionRateLimiter;

use chrono::TimeDelta;
use doppel_config::model::LimitsConfig;

/// The guard chain's stateful pieces, built once from configured limits
/// and shared across requests.
pub struct Guards {
    pub rate: SessionRateLimiter,
    pub clients: ClientSessionTracker,
    pub budget: TokenBudget,
    session_max_age: TimeDelta,
}

impl Guards {
    /// Builds the guard state from configured ceilings.
    pub fn new(limits: &LimitsConfig) -> Self {
        Self {
            rate: SessionRateLimiter::new(
                limits.max_requests_per_session,
                limits.rate_window_secs,
            ),
            clients: ClientSessionTracker::new(limits.max_sessions_per_client),
            budget: TokenBudget::new(limits.session_token_budget),
            session_max_age: TimeDelta::seconds(limits.session_max_age_secs as i64),
        }
    }

    /// The configured conversation age threshold.
    pub fn session_max_age(&self) -> TimeDelta {
        self.session_max_age
    }
}
