// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session cumulative token budgets.
//!
//! The same [`TokenBudget::consume`] call serves as both the pre-call
//! gate (cost 0) and the post-call accounting step (real cost). The check
//! runs before the add, so a session can overshoot the ceiling by exactly
//! one exchange's estimate; the next request is then rejected. That
//! overshoot allowance is part of the contract, not an accident.

use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

use doppel_core::DoppelError;

/// Estimated token cost of one exchange: total byte length over four.
///
/// A coarse heuristic, not a tokenizer. The budget arithmetic depends on
/// this exact formula; do not substitute a real token count.
pub fn estimate_exchange_tokens(user_message: &str, response: &str) -> u64 {
    ((user_message.len() + response.len()) / 4) as u64
}

/// Cumulative estimated-token counter per session.
///
/// Counters are process-lifetime: they reset on restart or when the
/// session's stored conversation is deleted on expiry.
pub struct TokenBudget {
    ceiling: u64,
    used: DashMap<Uuid, u64>,
}

impl TokenBudget {
    /// Creates a budget with the given per-session ceiling.
    pub fn new(ceiling: u64) -> Self {
        Self {
            ceiling,
            used: DashMap::new(),
        }
    }

    /// Rejects when the session's counter already exceeds the ceiling,
    /// then adds `cost`. Call with cost 0 to gate without charging.
    pub fn consume(&self, session_id: &Uuid, cost: u64) -> Result<(), DoppelError> {
        let mut entry = self.used.entry(*session_id).or_insert(0);

        if *entry > self.ceiling {
            warn!(
                %session_id,
                used = *entry,
                ceiling = self.ceiling,
                "session token budget exhausted"
            );
            return Err(DoppelError::BudgetExhausted {
                message: "Token budget for this session is exhausted.".to_string(),
            });
        }

        *entry += cost;
        Ok(())
    }

    /// Current counter value for the session (for logs and tests).
    pub fn used(&self, session_id: &Uuid) -> u64 {
        self.used.get(session_id).map(|v| *v).unwrap_or(0)
    }

    /// Clears the session's counter. Called when the session is deleted.
    pub fn reset(&self, session_id: &Uuid) {
        self.used.remove(session_id);
    }
}
