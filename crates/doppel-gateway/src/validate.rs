// SPDX-FileCopyrightText: 2026 Doppel Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Inbound request validation, applied before any guard runs.

use uuid::Uuid;

/// Maximum message length in characters, after whitespace collapse.
const MAX_MESSAGE_CHARS: usize = 2000;

/// Messages longer than this with fewer than [`MIN_DISTINCT_CHARS`]
/// distinct characters are rejected as spam.
const SPAM_LENGTH_THRESHOLD: usize = 20;
const MIN_DISTINCT_CHARS: usize = 5;

/// Normalizes and validates the message body.
///
/// Collapses whitespace runs to single spaces, then rejects empty,
/// over-long, and low-entropy (repeated-character) messages. Returns the
/// normalized message.
pub fn validate_message(raw: &str) -> Result<String, String> {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");

    if collapsed.is_empty() {
        return Err("Message cannot be empty".to_string());
    }

    let char_count = collapsed.chars().count();
    if char_count > MAX_MESSAGE_CHARS {
        return Err(format!(
            "Message must be at most {MAX_MESSAGE_CHARS} characters"
        ));
    }

    if char_count > SPAM_LENGTH_THRESHOLD {
        let distinct: std::collections::HashSet<char> = collapsed.chars().collect();
        if distinct.len() < MIN_DISTINCT_CHARS {
            return Err("Invalid message format".to_string());
        }
    }

    Ok(collapsed)
}

/// Parses an optional client-supplied session id.
pub fn validate_session_id(raw: Option<&str>) -> Result<Option<Uuid>, String> {
    match raw {
        None => Ok(None),
        Some(s) => s
            .parse::<Uuid>()
            .map(Some)
            .map_err(|_| "Invalid session ID format".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_collapsed() {
        assert_eq!(
            validate_message("  hello   there \n  world  ").unwrap(),
            "hello there world"
        );
    }

    #[test]
    fn empty_and_whitespace_only_are_rejected() {
        assert!(validate_message("").is_err());
        assert!(validate_message("   \n\t  ").is_err());
    }

    #[test]
    fn overlong_message_is_rejected() {
        let long = "a b".repeat(1400);
        assert!(validate_message(&long).is_err());
    }

    #[test]
    fn length_boundary_is_2000_chars() {
        let at_limit = "abcde".repeat(400);
        assert!(validate_message(&at_limit).is_ok());

        let over_limit = format!("{at_limit}x");
        assert!(validate_message(&over_limit).is_err());
    }

    #[test]
    fn repeated_characters_are_rejected_as_spam() {
        assert!(validate_message(&"a".repeat(30)).is_err());
        assert!(validate_message("ababababababababababababab").is_err());
    }

    #[test]
    fn short_repetitive_messages_pass() {
        // At or under 20 characters the distinct-character rule is not applied.
        assert!(validate_message("aaaaaaaaaa").is_ok());
    }

    #[test]
    fn normal_questions_pass() {
        assert!(validate_message("What are your skills?").is_ok());
    }

    #[test]
    fn valid_uuid_parses() {
        let parsed =
            validate_session_id(Some("7c9e6679-7425-40de-944b-e07fc1f90ae7")).unwrap();
        assert!(parsed.is_some());
    }

    #[test]
    fn missing_session_id_is_ok() {
        assert_eq!(validate_session_id(None).unwrap(), None);
    }

    #[test]
    fn malformed_session_id_is_rejected() {
        assert!(validate_session_id(Some("not-a-uuid")).is_err());
        assert!(validate_session_id(Some("")).is_err());
    }
}
