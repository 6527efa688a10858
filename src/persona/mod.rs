//! Rule-based persona responders.
//!
//! Each responder selects a canned response template by case-insensitive
//! keyword matching over the user message and returns the text together
//! with the mode tag that produced it. There is no model behind these;
//! variety comes from small fixed phrase pools.

pub mod sarah;
pub mod steven;

pub use sarah::SarahResponder;
pub use steven::StevenResponder;

/// A generated reply plus the mode that produced it.
#[derive(Debug, Clone)]
pub struct PersonaReply {
    pub text: String,
    pub mode: &'static str,
}

pub(crate) fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}
