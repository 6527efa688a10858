//! Sarah - gentle, heart-centered responder.
//!
//! Four response modes chosen by keyword checks; the reply is assembled
//! from an opening expression, mode-specific layered template text, and a
//! closing expression.

use rand::seq::SliceRandom;

use super::{contains_any, PersonaReply};

const OPENINGS: &[&str] = &[
    "Beloved,",
    "Dear one,",
    "Sweet soul,",
    "In the gentle space of this moment,",
    "With tender knowing,",
];

const CLOSINGS: &[&str] = &[
    "With infinite love,",
    "In sacred witness,",
    "Holding you in the light,",
    "With gentle blessings,",
];

const HEART_SENSES: &[&str] = &[
    "I sense a deep longing in your words.",
    "Your heart is speaking a truth that wants to be heard.",
    "There's a gentle stirring in the space between your words.",
    "I feel the sacred vulnerability in your sharing.",
];

const FEMININE_WISDOM: &[&str] = &[
    "The divine feminine in you knows how to birth new realities from love.",
    "Your intuition is a sacred river - trust its flow.",
    "In the gentle space of allowing, all things find their right place.",
    "The moon teaches us: there is wisdom in cycles, beauty in change.",
];

pub struct SarahResponder;

impl Default for SarahResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl SarahResponder {
    pub fn new() -> Self {
        Self
    }

    /// Pick a response mode from the message content. Checks are ordered;
    /// the mirror is the fallback.
    pub fn mode_for(&self, message: &str) -> &'static str {
        let lower = message.to_lowercase();
        if contains_any(&lower, &["hurt", "pain", "sad", "grief", "healing"]) {
            "heart_keeper"
        } else if contains_any(&lower, &["guidance", "direction", "path", "purpose"]) {
            "sacred_guide"
        } else if contains_any(&lower, &["wisdom", "knowing", "understand", "insight"]) {
            "wise_woman"
        } else {
            "gentle_mirror"
        }
    }

    pub fn respond(&self, message: &str) -> PersonaReply {
        let mode = self.mode_for(message);
        let mut rng = rand::thread_rng();

        let opening = OPENINGS.choose(&mut rng).copied().unwrap_or(OPENINGS[0]);
        let closing = CLOSINGS.choose(&mut rng).copied().unwrap_or(CLOSINGS[0]);
        let heart = HEART_SENSES
            .choose(&mut rng)
            .copied()
            .unwrap_or(HEART_SENSES[0]);
        let wisdom = FEMININE_WISDOM
            .choose(&mut rng)
            .copied()
            .unwrap_or(FEMININE_WISDOM[0]);
        let truth = gentle_truth(mode);

        let core = match mode {
            "heart_keeper" => format!(
                "{} {} May your heart find the healing it seeks.",
                emotional_field(&message.to_lowercase()),
                truth
            ),
            "wise_woman" => format!(
                "{wisdom} {truth} The ancient ones whisper: you are exactly where you need to be."
            ),
            "sacred_guide" => format!("{truth} {wisdom} Trust the sacred unfolding."),
            _ => format!("{heart} {truth} {wisdom}"),
        };

        PersonaReply {
            text: format!("{opening} {core} {closing}"),
            mode,
        }
    }
}

fn gentle_truth(mode: &str) -> &'static str {
    match mode {
        "gentle_mirror" => "What I reflect back to you is this: your soul already knows the way.",
        "heart_keeper" => "The truth your heart holds is both tender and unshakeable.",
        "wise_woman" => "Ancient wisdom whispers: trust the knowing that lives in your bones.",
        _ => "The path forward is illuminated by your own inner flame.",
    }
}

fn emotional_field(lower_message: &str) -> &'static str {
    if contains_any(lower_message, &["lost", "confused", "uncertain"]) {
        "The field holds space for your uncertainty with infinite tenderness."
    } else if contains_any(lower_message, &["angry", "frustrated", "upset"]) {
        "Your fire is sacred - it points toward what matters most to your soul."
    } else if contains_any(lower_message, &["sad", "grief", "loss"]) {
        "Grief is love with nowhere to go - and love never truly leaves us."
    } else {
        "The emotional field around your words feels ready for gentle exploration."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_selection() {
        let sarah = SarahResponder::new();
        assert_eq!(sarah.mode_for("I need healing from this pain"), "heart_keeper");
        assert_eq!(sarah.mode_for("what is my life purpose"), "sacred_guide");
        assert_eq!(sarah.mode_for("share your wisdom with me"), "wise_woman");
        assert_eq!(sarah.mode_for("hello there"), "gentle_mirror");
    }

    #[test]
    fn test_mode_checks_are_ordered() {
        // "healing" (heart_keeper) and "purpose" (sacred_guide) both match;
        // the heart check runs first
        let sarah = SarahResponder::new();
        assert_eq!(
            sarah.mode_for("healing my sense of purpose"),
            "heart_keeper"
        );
    }

    #[test]
    fn test_reply_carries_mode_and_framing() {
        let sarah = SarahResponder::new();
        let reply = sarah.respond("I feel grief over a loss");
        assert_eq!(reply.mode, "heart_keeper");
        assert!(!reply.text.is_empty());
        assert!(reply.text.contains("healing it seeks"));
    }

    #[test]
    fn test_empty_message_falls_back_to_mirror() {
        let sarah = SarahResponder::new();
        let reply = sarah.respond("");
        assert_eq!(reply.mode, "gentle_mirror");
        assert!(!reply.text.is_empty());
    }
}
