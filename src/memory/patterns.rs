//! Keyword-driven pattern extraction over a chat exchange.
//!
//! All matching is case-insensitive substring containment against fixed
//! keyword tables, not tokenization: "manipulate" also matches inside a
//! longer word.

use super::types::{
    EmotionalTone, ExtractedPatterns, GuidanceType, PersonaIndicators, UserTone,
};

const THEME_KEYWORDS: &[(&str, &[&str])] = &[
    (
        "spiritual_growth",
        &["spiritual", "awakening", "consciousness", "enlightenment", "soul"],
    ),
    (
        "relationships",
        &["relationship", "love", "partner", "family", "friend"],
    ),
    ("career_purpose", &["career", "job", "purpose", "calling", "work"]),
    ("healing", &["healing", "trauma", "pain", "recovery", "therapy"]),
    ("creativity", &["creative", "art", "music", "writing", "expression"]),
    (
        "decision_making",
        &["decision", "choice", "confused", "uncertain", "direction"],
    ),
    (
        "personal_growth",
        &["growth", "development", "improvement", "change", "transformation"],
    ),
    (
        "meaning_purpose",
        &["meaning", "purpose", "why", "point", "significance"],
    ),
];

const STEVEN_KEYWORDS: &[&str] = &[
    "logic", "reason", "structure", "system", "chaos", "order", "transformation",
];
const SARAH_KEYWORDS: &[&str] = &[
    "feel", "emotion", "heart", "healing", "relationship", "love", "gentle",
];
const BOTH_KEYWORDS: &[&str] = &[
    "complex", "confused", "multiple", "perspective", "help", "guidance",
];

const POSITIVE_WORDS: &[&str] = &[
    "happy", "joy", "love", "grateful", "excited", "hopeful", "peaceful",
];
const NEGATIVE_WORDS: &[&str] = &[
    "sad", "angry", "frustrated", "worried", "anxious", "depressed", "lost",
];
const SUPPORTIVE_WORDS: &[&str] = &["understand", "support", "compassion", "gentle"];

const BREAKTHROUGH_KEYWORDS: &[&str] = &["breakthrough", "realization", "understand", "clarity"];
const GROWTH_KEYWORDS: &[&str] = &["ready", "change", "grow", "transform"];
const RESISTANCE_KEYWORDS: &[&str] = &["stuck", "can't", "impossible", "hopeless"];
const INTEGRATION_KEYWORDS: &[&str] = &["integrate", "embody", "practice", "apply"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

fn count_hits(haystack: &str, needles: &[&str]) -> usize {
    needles.iter().filter(|n| haystack.contains(*n)).count()
}

/// Tag zero or more themes from the user message. A theme is tagged if any
/// of its keywords appears; table order determines output order.
pub fn identify_themes(user_message: &str) -> Vec<String> {
    let lower = user_message.to_lowercase();
    THEME_KEYWORDS
        .iter()
        .filter(|(_, keywords)| contains_any(&lower, keywords))
        .map(|(theme, _)| theme.to_string())
        .collect()
}

/// Classify the guidance style of a response. Checks are ordered and
/// mutually exclusive, first match wins.
pub fn classify_guidance(ai_response: &str) -> GuidanceType {
    let lower = ai_response.to_lowercase();
    if contains_any(&lower, &["reflect", "consider", "explore", "examine"]) {
        GuidanceType::Reflective
    } else if contains_any(&lower, &["action", "step", "do", "try", "practice"]) {
        GuidanceType::Actionable
    } else if contains_any(&lower, &["perspective", "view", "see", "understand"]) {
        GuidanceType::PerspectiveShift
    } else if contains_any(&lower, &["feel", "emotion", "heart", "compassion"]) {
        GuidanceType::EmotionalSupport
    } else {
        GuidanceType::Informational
    }
}

/// Count per-persona keyword hits in the user message.
pub fn persona_indicators(user_message: &str) -> PersonaIndicators {
    let lower = user_message.to_lowercase();
    PersonaIndicators {
        steven_indicators: count_hits(&lower, STEVEN_KEYWORDS),
        sarah_indicators: count_hits(&lower, SARAH_KEYWORDS),
        both_indicators: count_hits(&lower, BOTH_KEYWORDS),
    }
}

/// Three-way sentiment of the user message plus supportiveness counts from
/// the response. Positive wins ties by strict majority, not `>=`.
pub fn emotional_tone(user_message: &str, ai_response: &str) -> EmotionalTone {
    let user_lower = user_message.to_lowercase();
    let response_lower = ai_response.to_lowercase();

    let user_positive = count_hits(&user_lower, POSITIVE_WORDS);
    let user_negative = count_hits(&user_lower, NEGATIVE_WORDS);

    let response_positive = count_hits(&response_lower, POSITIVE_WORDS);
    let response_supportive = count_hits(&response_lower, SUPPORTIVE_WORDS);

    let user_tone = if user_positive > user_negative {
        UserTone::Positive
    } else if user_negative > 0 {
        UserTone::Negative
    } else {
        UserTone::Neutral
    };

    EmotionalTone {
        user_tone,
        response_supportiveness: response_supportive,
        emotional_shift_potential: response_positive + response_supportive,
    }
}

/// Flag zero or more transformation indicators. The four checks are
/// independent; the first three read the user message, the last reads the
/// response.
pub fn transformation_indicators(user_message: &str, ai_response: &str) -> Vec<String> {
    let user_lower = user_message.to_lowercase();
    let response_lower = ai_response.to_lowercase();
    let mut indicators = Vec::new();

    if contains_any(&user_lower, BREAKTHROUGH_KEYWORDS) {
        indicators.push("breakthrough_moment".to_string());
    }
    if contains_any(&user_lower, GROWTH_KEYWORDS) {
        indicators.push("growth_readiness".to_string());
    }
    if contains_any(&user_lower, RESISTANCE_KEYWORDS) {
        indicators.push("resistance_present".to_string());
    }
    if contains_any(&response_lower, INTEGRATION_KEYWORDS) {
        indicators.push("integration_guidance".to_string());
    }

    indicators
}

/// Run every extractor over one exchange.
pub fn extract(user_message: &str, ai_response: &str) -> ExtractedPatterns {
    ExtractedPatterns {
        themes: identify_themes(user_message),
        guidance_type: classify_guidance(ai_response),
        persona_effectiveness: persona_indicators(user_message),
        emotional_tone: emotional_tone(user_message, ai_response),
        transformation_indicators: transformation_indicators(user_message, ai_response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theme_tagging_is_order_independent() {
        let a = identify_themes("healing from a difficult relationship");
        let b = identify_themes("my relationship needs healing");
        assert_eq!(a, b);
        assert!(a.contains(&"relationships".to_string()));
        assert!(a.contains(&"healing".to_string()));
    }

    #[test]
    fn test_no_themes_for_unrelated_text() {
        assert!(identify_themes("the weather is fine today").is_empty());
    }

    #[test]
    fn test_theme_matching_is_substring_based() {
        // "why" appears inside other text without word boundaries
        let themes = identify_themes("anyway, whys and wherefores");
        assert!(themes.contains(&"meaning_purpose".to_string()));
    }

    #[test]
    fn test_guidance_first_match_wins() {
        // "consider" (reflective) appears alongside "step" (actionable);
        // reflective is checked first
        assert_eq!(
            classify_guidance("Consider taking one small step."),
            GuidanceType::Reflective
        );
        assert_eq!(
            classify_guidance("Take one small step today."),
            GuidanceType::Actionable
        );
        assert_eq!(classify_guidance("Hmm."), GuidanceType::Informational);
    }

    #[test]
    fn test_emotional_tone_tie_is_not_positive() {
        // one positive hit, one negative hit: positive requires strict majority
        let tone = emotional_tone("happy but sad", "");
        assert_eq!(tone.user_tone, UserTone::Negative);

        let tone = emotional_tone("so happy and grateful", "");
        assert_eq!(tone.user_tone, UserTone::Positive);

        let tone = emotional_tone("just wondering about things", "");
        assert_eq!(tone.user_tone, UserTone::Neutral);
    }

    #[test]
    fn test_shift_potential_sums_positive_and_supportive() {
        let tone = emotional_tone("", "I understand, and there is hopeful support here");
        // "understand" + "support" supportive, "hopeful" positive
        assert_eq!(tone.response_supportiveness, 2);
        assert_eq!(tone.emotional_shift_potential, 3);
    }

    #[test]
    fn test_transformation_indicators_are_independent() {
        let indicators = transformation_indicators(
            "I feel stuck but ready for change",
            "practice this daily",
        );
        assert!(indicators.contains(&"growth_readiness".to_string()));
        assert!(indicators.contains(&"resistance_present".to_string()));
        assert!(indicators.contains(&"integration_guidance".to_string()));
        assert!(!indicators.contains(&"breakthrough_moment".to_string()));
    }

    #[test]
    fn test_empty_exchange_degrades_to_empty_bundle() {
        let patterns = extract("", "");
        assert!(patterns.themes.is_empty());
        assert!(patterns.transformation_indicators.is_empty());
        assert_eq!(patterns.guidance_type, GuidanceType::Informational);
        assert_eq!(patterns.emotional_tone.user_tone, UserTone::Neutral);
    }
}
