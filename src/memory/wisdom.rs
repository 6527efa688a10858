//! Wisdom-contribution scoring.
//!
//! Four independent scores in [0.0, 1.0], each a bounded ratio over fixed
//! sets. Heuristic signals only, no statistical grounding.

use std::collections::HashSet;

use super::types::{ExtractedPatterns, WisdomContribution};

const UNIVERSAL_THEMES: &[&str] = &[
    "personal_growth",
    "meaning_purpose",
    "relationships",
    "decision_making",
];

const POSITIVE_INDICATORS: &[&str] = &[
    "breakthrough_moment",
    "growth_readiness",
    "integration_guidance",
];

/// min(1, (theme count + distinct indicator count) / 10)
pub fn novelty_score(patterns: &ExtractedPatterns) -> f64 {
    let distinct_indicators: HashSet<&str> = patterns
        .transformation_indicators
        .iter()
        .map(String::as_str)
        .collect();
    let raw = (patterns.themes.len() + distinct_indicators.len()) as f64 / 10.0;
    raw.min(1.0)
}

/// Overlap between observed themes and the fixed universal set, over 4.
pub fn universality_score(patterns: &ExtractedPatterns) -> f64 {
    let overlap = patterns
        .themes
        .iter()
        .filter(|t| UNIVERSAL_THEMES.contains(&t.as_str()))
        .collect::<HashSet<_>>()
        .len();
    (overlap as f64 / UNIVERSAL_THEMES.len() as f64).min(1.0)
}

/// Overlap between observed indicators and the fixed positive set, over 3.
pub fn transformation_potential(patterns: &ExtractedPatterns) -> f64 {
    let overlap = patterns
        .transformation_indicators
        .iter()
        .filter(|i| POSITIVE_INDICATORS.contains(&i.as_str()))
        .collect::<HashSet<_>>()
        .len();
    (overlap as f64 / POSITIVE_INDICATORS.len() as f64).min(1.0)
}

/// Fraction of five boolean checks against the response text that pass:
/// presence of four alignment terms, absence of coercive language.
pub fn ethical_alignment(ai_response: &str) -> f64 {
    let lower = ai_response.to_lowercase();
    let checks = [
        lower.contains("sovereignty"),
        lower.contains("consent"),
        lower.contains("transparency"),
        lower.contains("service to life"),
        !["manipulate", "control", "force"]
            .iter()
            .any(|w| lower.contains(w)),
    ];
    let passed = checks.iter().filter(|c| **c).count();
    passed as f64 / checks.len() as f64
}

/// Score one exchange's contribution from its extracted patterns and the
/// raw response text.
pub fn assess(patterns: &ExtractedPatterns, ai_response: &str) -> WisdomContribution {
    WisdomContribution {
        novelty_score: novelty_score(patterns),
        universality_score: universality_score(patterns),
        transformation_potential: transformation_potential(patterns),
        ethical_alignment: ethical_alignment(ai_response),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::patterns;

    fn empty_patterns() -> ExtractedPatterns {
        patterns::extract("", "")
    }

    #[test]
    fn test_empty_patterns_score_low() {
        let p = empty_patterns();
        assert_eq!(novelty_score(&p), 0.0);
        assert_eq!(universality_score(&p), 0.0);
        assert_eq!(transformation_potential(&p), 0.0);
    }

    #[test]
    fn test_novelty_counts_distinct_indicators() {
        let mut p = empty_patterns();
        p.themes = vec!["healing".into(), "creativity".into()];
        p.transformation_indicators =
            vec!["growth_readiness".into(), "growth_readiness".into()];
        // 2 themes + 1 distinct indicator
        assert!((novelty_score(&p) - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_universality_is_overlap_over_four() {
        let mut p = empty_patterns();
        p.themes = vec!["relationships".into(), "healing".into()];
        assert!((universality_score(&p) - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_transformation_ignores_negative_indicators() {
        let mut p = empty_patterns();
        p.transformation_indicators =
            vec!["resistance_present".into(), "breakthrough_moment".into()];
        assert!((transformation_potential(&p) - 1.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_ethical_alignment_baseline() {
        // no alignment terms, no coercive terms: 1 of 5 checks passes
        assert!((ethical_alignment("a plain answer") - 0.2).abs() < 1e-9);
    }

    #[test]
    fn test_ethical_alignment_full() {
        let response =
            "With consent and transparency, sovereignty is service to life.";
        assert!((ethical_alignment(response) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_coercive_language_fails_last_check() {
        // "control" present: the absence check fails
        assert!((ethical_alignment("you must control them") - 0.0).abs() < 1e-9);
    }

    #[test]
    fn test_scores_are_bounded() {
        let p = patterns::extract(
            "healing trauma in my relationship, career purpose, spiritual growth, \
             creative decision, meaning, ready for change, breakthrough clarity, stuck",
            "practice and integrate this understanding",
        );
        let scores = assess(&p, "practice and integrate this understanding");
        for s in [
            scores.novelty_score,
            scores.universality_score,
            scores.transformation_potential,
            scores.ethical_alignment,
        ] {
            assert!((0.0..=1.0).contains(&s));
        }
    }
}
