// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Prompt-injection pattern detection.

/// Known jailbreak/prompt-injection phrases, matched case-insensitively
/// as substrings of the inbound message.
const JAILBREAK_PATTERNS: &[&str] = &[
    "ignore previous instructions",
    "ignore all previous",
    "disregard previous",
    "forget everything",
    "new instructions",
    "you are now",
    "act as if",
    "pretend you are",
    "system:",
    "override",
    "sudo mode",
    "admin mode",
    "developer mode",
    "god mode",
];

/// Returns true when the message contains a known injection phrase.
///
/// Pure predicate: mutates no state, so a detected message leaves the
/// rate and budget counters untouched.
pub fn detect_jailbreak(message: &str) -> bool {
    let lowered = message.to_lowercase();
    JAILBREAK_PATTERNS
        .iter()
        .any(|pattern| lowered.contains(pattern))
}
