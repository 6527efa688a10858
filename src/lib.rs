//! Synthsara - collective memory server.
//!
//! Persona chat responders, a consent-gated conversation archive with
//! keyword analytics, and flat-file platform state (accounts, the WORTH
//! ledger, governance, marketplace) behind an axum REST API.
//!
//! # Privacy model
//! Raw conversation text is hashed before persistence. Derived analytics
//! (themes, wisdom patterns, collective insights) are produced only for
//! sessions that registered `collective` consent, and conversations are
//! deleted once they age past their session's retention window.

pub mod auth;
pub mod config;
pub mod errors;
pub mod handlers;
pub mod memory;
pub mod metrics;
pub mod middleware;
pub mod persona;
pub mod platform;
pub mod validation;

// Re-export dependencies so tests use the same versions
pub use chrono;
pub use uuid;
