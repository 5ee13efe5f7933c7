// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-session sliding-window request rate limiting.

use chrono::{DateTime, TimeDelta, Utc};
use dashmap::DashMap;
use tracing::warn;
use uuid::Uuid;

use doppel_core::DoppelError;

/// Sliding-window rate limiter keyed by session id.
///
/// Each check filters out request instants older than the window, rejects
/// when the remaining count has reached the ceiling, and records the new
/// instant otherwise. The whole read-modify-write happens inside one
/// DashMap entry access, so concurrent requests for the same session
/// serialize on the shard lock.
///
/// State is process-lifetime only and resets on restart.
pub struct SessionRateLimiter {
    max_requests: usize,
    window: TimeDelta,
    requests: DashMap<Uuid, Vec<DateTime<Utc>>>,
}

impl SessionRateLimiter {
    /// Creates a limiter allowing `max_requests` per `window_secs`.
    pub fn new(max_requests: usize, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: TimeDelta::seconds(window_secs as i64),
            requests: DashMap::new(),
        }
    }

    /// Checks the session against the window and records this request.
    pub fn check_and_record(&self, session_id: &Uuid) -> Result<(), DoppelError> {
        self.check_and_record_at(session_id, Utc::now())
    }

    fn check_and_record_at(
        &self,
        session_id: &Uuid,
        now: DateTime<Utc>,
    ) -> Result<(), DoppelError> {
        let window_start = now - self.window;
        let mut entry = self.requests.entry(*session_id).or_default();
        entry.retain(|instant| *instant > window_start);

        if entry.len() >= self.max_requests {
            warn!(
                %session_id,
                count = entry.len(),
                max = self.max_requests,
                "session rate limit exceeded"
            );
            return Err(DoppelError::RateLimited {
                message: "Too many requests for this session. Try again later.".to_string(),
            });
        }

        entry.push(now);
        Ok(())
    }
}
