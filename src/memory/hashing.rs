//! Stable content digests for storage-without-raw-content privacy.

use sha2::{Digest, Sha256};

/// SHA-256 hex digest of free-text content.
pub fn hash_content(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}

/// Digest of an anonymized (user message, response) pair.
///
/// The pair is joined with a `|` separator before hashing so that moving
/// text between the two halves changes the digest.
pub fn hash_anonymized_pair(user_message: &str, ai_response: &str) -> String {
    hash_content(&format!("{user_message}|{ai_response}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_content_same_digest() {
        assert_eq!(hash_content("hello world"), hash_content("hello world"));
    }

    #[test]
    fn test_different_content_different_digest() {
        assert_ne!(hash_content("hello world"), hash_content("hello worlds"));
        assert_ne!(hash_content(""), hash_content(" "));
    }

    #[test]
    fn test_digest_is_hex_sha256() {
        let digest = hash_content("anything");
        assert_eq!(digest.len(), 64);
        assert!(digest.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_pair_hash_is_position_sensitive() {
        assert_ne!(
            hash_anonymized_pair("a", "b"),
            hash_anonymized_pair("b", "a")
        );
    }
}
