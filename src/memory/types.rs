//! Record types for the collective memory store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How much derived processing a session has permitted on stored content.
///
/// Ordering of permissiveness: `private` < `anonymous` < `collective`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsentLevel {
    Private,
    Anonymous,
    Collective,
}

impl ConsentLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Private => "private",
            Self::Anonymous => "anonymous",
            Self::Collective => "collective",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "private" => Some(Self::Private),
            "anonymous" => Some(Self::Anonymous),
            "collective" => Some(Self::Collective),
            _ => None,
        }
    }

    /// Anonymized pair hashing is permitted at `anonymous` and above.
    pub fn allows_anonymized(&self) -> bool {
        matches!(self, Self::Anonymous | Self::Collective)
    }

    /// Pattern extraction and collective learning require full consent.
    pub fn allows_collective(&self) -> bool {
        matches!(self, Self::Collective)
    }
}

/// Which responder produced the logged exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Persona {
    Sarah,
    Steven,
    Collective,
}

impl Persona {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sarah => "sarah",
            Self::Steven => "steven",
            Self::Collective => "collective",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "sarah" => Some(Self::Sarah),
            "steven" => Some(Self::Steven),
            "collective" => Some(Self::Collective),
            _ => None,
        }
    }
}

/// Guidance classification of a response, first matching rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GuidanceType {
    Reflective,
    Actionable,
    PerspectiveShift,
    EmotionalSupport,
    Informational,
}

/// Coarse sentiment of the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserTone {
    Positive,
    Negative,
    Neutral,
}

/// Keyword-hit counts per persona. Not normalized, not mutually exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaIndicators {
    pub steven_indicators: usize,
    pub sarah_indicators: usize,
    pub both_indicators: usize,
}

/// Emotional tone analysis of a (user message, response) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmotionalTone {
    pub user_tone: UserTone,
    pub response_supportiveness: usize,
    pub emotional_shift_potential: usize,
}

/// The full pattern bundle extracted from one exchange under collective consent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedPatterns {
    pub themes: Vec<String>,
    pub guidance_type: GuidanceType,
    pub persona_effectiveness: PersonaIndicators,
    pub emotional_tone: EmotionalTone,
    pub transformation_indicators: Vec<String>,
}

/// Four bounded heuristic scores describing how an exchange contributes
/// to the collective pattern store.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WisdomContribution {
    pub novelty_score: f64,
    pub universality_score: f64,
    pub transformation_potential: f64,
    pub ethical_alignment: f64,
}

/// A single archived exchange. Raw text never reaches this type's persisted
/// form, only digests and derived fields.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationRecord {
    pub id: String,
    pub session_id: String,
    pub timestamp: DateTime<Utc>,
    pub user_message_hash: String,
    pub ai_response_hash: String,
    pub ai_persona: Persona,
    pub ai_mode: String,
    pub consent_level: ConsentLevel,
    pub anonymized_hash: Option<String>,
    pub extracted_patterns: Option<ExtractedPatterns>,
    pub wisdom_contribution: Option<WisdomContribution>,
}

/// Per-theme frequency aggregate.
#[derive(Debug, Clone, Serialize)]
pub struct WisdomPattern {
    pub id: String,
    pub pattern_type: String,
    pub theme: String,
    pub frequency: i64,
    pub effectiveness_score: f64,
    pub anonymized_examples: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub last_updated: DateTime<Utc>,
}

/// A synthesized record asserting a theme has crossed the surfacing threshold.
#[derive(Debug, Clone, Serialize)]
pub struct CollectiveInsight {
    pub id: String,
    pub title: String,
    pub description: String,
    pub supporting_patterns: Vec<String>,
    pub confidence_score: f64,
    pub impact_potential: String,
    pub ethical_review_status: String,
    pub created_at: DateTime<Utc>,
}

/// Per-session retention and consent settings.
#[derive(Debug, Clone, Serialize)]
pub struct ConsentPreference {
    pub session_id: String,
    pub consent_level: ConsentLevel,
    pub data_retention_days: i64,
    pub collective_learning_enabled: bool,
    pub anonymization_required: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A theme with its observed frequency, for the stats endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeFrequency {
    pub theme: String,
    pub frequency: i64,
}

/// Aggregate view of the archive.
#[derive(Debug, Clone, Serialize)]
pub struct NetworkStatistics {
    pub total_conversations: i64,
    pub consent_breakdown: HashMap<String, i64>,
    pub active_sessions_7_days: i64,
    pub wisdom_patterns_count: i64,
    pub collective_insights_count: i64,
    pub top_themes: Vec<ThemeFrequency>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_consent_level_roundtrip() {
        for level in [
            ConsentLevel::Private,
            ConsentLevel::Anonymous,
            ConsentLevel::Collective,
        ] {
            assert_eq!(ConsentLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(ConsentLevel::parse("public"), None);
    }

    #[test]
    fn test_consent_gating_flags() {
        assert!(!ConsentLevel::Private.allows_anonymized());
        assert!(!ConsentLevel::Private.allows_collective());
        assert!(ConsentLevel::Anonymous.allows_anonymized());
        assert!(!ConsentLevel::Anonymous.allows_collective());
        assert!(ConsentLevel::Collective.allows_anonymized());
        assert!(ConsentLevel::Collective.allows_collective());
    }

    #[test]
    fn test_persona_serde_is_lowercase() {
        assert_eq!(serde_json::to_string(&Persona::Sarah).unwrap(), "\"sarah\"");
        assert_eq!(Persona::parse("collective"), Some(Persona::Collective));
    }
}
