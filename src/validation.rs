//! Input validation shared by the HTTP handlers.
//!
//! Identifiers get shape checks; message bodies get only a size cap, since
//! empty messages are valid input that degrades to zero-score analytics.

use anyhow::{anyhow, Result};

pub const MAX_SESSION_ID_LENGTH: usize = 128;
pub const MAX_MESSAGE_LENGTH: usize = 50_000; // 50KB
pub const MAX_USERNAME_LENGTH: usize = 64;
pub const MAX_LIST_LIMIT: usize = 1_000;

/// Session ids: non-empty, bounded, restricted charset.
pub fn validate_session_id(session_id: &str) -> Result<()> {
    if session_id.is_empty() {
        return Err(anyhow!("session_id cannot be empty"));
    }

    if session_id.len() > MAX_SESSION_ID_LENGTH {
        return Err(anyhow!(
            "session_id too long: {} chars (max: {})",
            session_id.len(),
            MAX_SESSION_ID_LENGTH
        ));
    }

    if !session_id
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_' || c == '@' || c == '.')
    {
        return Err(anyhow!(
            "session_id contains invalid characters (allowed: alphanumeric, -, _, @, .)"
        ));
    }

    Ok(())
}

/// Chat messages: any content, including empty, up to the size cap.
pub fn validate_message(message: &str) -> Result<()> {
    if message.len() > MAX_MESSAGE_LENGTH {
        return Err(anyhow!(
            "message too long: {} bytes (max: {})",
            message.len(),
            MAX_MESSAGE_LENGTH
        ));
    }
    Ok(())
}

/// Usernames: non-empty, bounded, alphanumeric plus dash/underscore.
pub fn validate_username(username: &str) -> Result<()> {
    if username.is_empty() {
        return Err(anyhow!("username cannot be empty"));
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(anyhow!(
            "username too long: {} chars (max: {})",
            username.len(),
            MAX_USERNAME_LENGTH
        ));
    }

    if !username
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(anyhow!(
            "username contains invalid characters (allowed: alphanumeric, -, _)"
        ));
    }

    Ok(())
}

/// List limits: at least 1, bounded.
pub fn validate_limit(limit: usize) -> Result<()> {
    if limit == 0 {
        return Err(anyhow!("limit must be greater than 0"));
    }
    if limit > MAX_LIST_LIMIT {
        return Err(anyhow!("limit too large: {limit} (max: {MAX_LIST_LIMIT})"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_session_ids() {
        assert!(validate_session_id("anonymous").is_ok());
        assert!(validate_session_id("session-123").is_ok());
        assert!(validate_session_id("user@example.com").is_ok());
    }

    #[test]
    fn test_invalid_session_ids() {
        assert!(validate_session_id("").is_err());
        assert!(validate_session_id("has spaces").is_err());
        assert!(validate_session_id(&"a".repeat(200)).is_err());
    }

    #[test]
    fn test_empty_message_is_valid() {
        assert!(validate_message("").is_ok());
        assert!(validate_message("hello").is_ok());
    }

    #[test]
    fn test_oversized_message_rejected() {
        assert!(validate_message(&"x".repeat(MAX_MESSAGE_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_usernames() {
        assert!(validate_username("alice").is_ok());
        assert!(validate_username("user_2").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("a b").is_err());
        assert!(validate_username(&"a".repeat(100)).is_err());
    }

    #[test]
    fn test_limits() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(MAX_LIST_LIMIT).is_ok());
        assert!(validate_limit(0).is_err());
        assert!(validate_limit(MAX_LIST_LIMIT + 1).is_err());
    }
}
