//! Conversation archiving, pattern extraction, and collective wisdom
//! synthesis behind per-session consent and retention controls.
//!
//! Raw message text exists only transiently in memory; persistent storage
//! sees digests and derived fields. How much derivation happens is gated by
//! the owning session's consent level:
//!
//! - `private`   - hashes plus metadata only
//! - `anonymous` - adds an anonymized pair hash
//! - `collective` - adds pattern extraction, wisdom scoring, and feeds the
//!   shared pattern store and insight synthesizer

pub mod anonymizer;
pub mod hashing;
pub mod patterns;
pub mod store;
pub mod types;
pub mod wisdom;

pub use store::StoreError;
pub use types::*;

use chrono::Utc;
use rusqlite::Connection;
use std::path::PathBuf;
use tracing::{debug, info};
use uuid::Uuid;

use anonymizer::Anonymizer;

/// A pattern becomes insight-worthy at this observation count...
const MIN_INSIGHT_FREQUENCY: i64 = 5;
/// ...and this effectiveness score. Effectiveness is initialized to 0.5 on
/// pattern creation and no pipeline step recomputes it, so this bound is
/// only crossed when the score is adjusted out of band.
const MIN_INSIGHT_EFFECTIVENESS: f64 = 0.7;

/// How many top themes the stats endpoint reports.
const TOP_THEME_COUNT: usize = 5;

/// The collective memory archive. Every operation opens its own database
/// connection, does its reads/writes, and closes it; there is no pooling
/// and no transaction spans more than one logical step.
pub struct CollectiveMemory {
    db_path: PathBuf,
    default_retention_days: i64,
    anonymizer: Anonymizer,
}

impl CollectiveMemory {
    /// Open the archive, creating the database and schema if needed.
    pub fn new(db_path: impl Into<PathBuf>, default_retention_days: i64) -> Result<Self, StoreError> {
        let memory = Self {
            db_path: db_path.into(),
            default_retention_days,
            anonymizer: Anonymizer::new(),
        };
        memory.conn()?;
        info!(path = %memory.db_path.display(), "collective memory initialized");
        Ok(memory)
    }

    fn conn(&self) -> Result<Connection, StoreError> {
        store::open(&self.db_path)
    }

    /// Cheap reachability check for readiness probes.
    pub fn ping(&self) -> Result<(), StoreError> {
        let conn = self.conn()?;
        conn.query_row("SELECT 1", [], |_| Ok(()))?;
        Ok(())
    }

    /// Archive one exchange with the privacy protections the consent level
    /// permits. Returns the new record id.
    ///
    /// There is no rollback: a failure after the record insert leaves the
    /// record in place without its collective side effects.
    pub fn store_conversation(
        &self,
        session_id: &str,
        user_message: &str,
        ai_response: &str,
        persona: Persona,
        mode: &str,
        consent: ConsentLevel,
    ) -> Result<String, StoreError> {
        let id = Uuid::new_v4().to_string();
        let timestamp = Utc::now();

        let user_message_hash = hashing::hash_content(user_message);
        let ai_response_hash = hashing::hash_content(ai_response);

        let anonymized_hash = consent.allows_anonymized().then(|| {
            hashing::hash_anonymized_pair(
                &self.anonymizer.scrub(user_message),
                &self.anonymizer.scrub(ai_response),
            )
        });

        let (extracted_patterns, wisdom_contribution) = if consent.allows_collective() {
            let extracted = patterns::extract(user_message, ai_response);
            let contribution = wisdom::assess(&extracted, ai_response);
            (Some(extracted), Some(contribution))
        } else {
            (None, None)
        };

        let record = ConversationRecord {
            id: id.clone(),
            session_id: session_id.to_string(),
            timestamp,
            user_message_hash,
            ai_response_hash,
            ai_persona: persona,
            ai_mode: mode.to_string(),
            consent_level: consent,
            anonymized_hash,
            extracted_patterns,
            wisdom_contribution,
        };

        let conn = self.conn()?;
        store::insert_conversation(&conn, &record)?;
        crate::metrics::CONVERSATIONS_STORED_TOTAL
            .with_label_values(&[consent.as_str()])
            .inc();

        if let Some(extracted) = &record.extracted_patterns {
            for theme in &extracted.themes {
                store::record_theme(&conn, theme, timestamp)?;
            }
            self.synthesize_with(&conn)?;
        }

        debug!(
            conversation_id = %id,
            session_id,
            persona = persona.as_str(),
            consent = consent.as_str(),
            "conversation stored"
        );
        Ok(id)
    }

    /// Web-layer entry point: archive an exchange using the session's
    /// registered consent level (absent row reads as `private`).
    pub fn record_exchange(
        &self,
        session_id: &str,
        persona: Persona,
        mode: &str,
        user_message: &str,
        ai_response: &str,
    ) -> Result<String, StoreError> {
        let consent = self
            .consent(session_id)?
            .map(|pref| pref.consent_level)
            .unwrap_or(ConsentLevel::Private);
        self.store_conversation(session_id, user_message, ai_response, persona, mode, consent)
    }

    /// Materialize insights for patterns past the frequency/effectiveness
    /// threshold. Returns how many were created.
    pub fn synthesize_insights(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        self.synthesize_with(&conn)
    }

    fn synthesize_with(&self, conn: &Connection) -> Result<usize, StoreError> {
        let eligible =
            store::eligible_patterns(conn, MIN_INSIGHT_FREQUENCY, MIN_INSIGHT_EFFECTIVENESS)?;
        let mut created = 0;
        for pattern in eligible {
            if store::insight_exists_for(conn, &pattern.theme)? {
                continue;
            }
            store::insert_insight(
                conn,
                &CollectiveInsight {
                    id: Uuid::new_v4().to_string(),
                    title: format!("Collective Wisdom: {}", title_case(&pattern.theme)),
                    description: format!(
                        "Based on {} conversations, this theme shows high transformation potential.",
                        pattern.frequency
                    ),
                    supporting_patterns: vec![pattern.theme.clone()],
                    confidence_score: pattern.effectiveness_score,
                    impact_potential: "community".to_string(),
                    ethical_review_status: "pending".to_string(),
                    created_at: Utc::now(),
                },
            )?;
            info!(theme = %pattern.theme, frequency = pattern.frequency, "insight synthesized");
            created += 1;
        }
        if created > 0 {
            crate::metrics::INSIGHTS_SYNTHESIZED_TOTAL.inc_by(created as u64);
        }
        Ok(created)
    }

    /// Approved and pending insights, most confident first.
    pub fn insights(&self, limit: usize) -> Result<Vec<CollectiveInsight>, StoreError> {
        let conn = self.conn()?;
        store::list_insights(&conn, limit)
    }

    /// Wisdom patterns, optionally filtered to one theme.
    pub fn patterns(
        &self,
        theme: Option<&str>,
        limit: usize,
    ) -> Result<Vec<WisdomPattern>, StoreError> {
        let conn = self.conn()?;
        store::list_patterns(&conn, theme, limit)
    }

    /// Upsert a session's consent preferences.
    pub fn update_consent(
        &self,
        session_id: &str,
        level: ConsentLevel,
        retention_days: i64,
        collective_learning: bool,
        anonymization_required: bool,
    ) -> Result<(), StoreError> {
        let conn = self.conn()?;
        store::upsert_consent(
            &conn,
            session_id,
            level,
            retention_days,
            collective_learning,
            anonymization_required,
            Utc::now(),
        )?;
        info!(session_id, consent = level.as_str(), "consent updated");
        Ok(())
    }

    /// A session's consent preferences, if registered.
    pub fn consent(&self, session_id: &str) -> Result<Option<ConsentPreference>, StoreError> {
        let conn = self.conn()?;
        store::get_consent(&conn, session_id)
    }

    /// Delete conversations older than their session's retention window.
    /// Returns the number removed. Externally triggered; there is no
    /// internal scheduler.
    pub fn sweep_expired(&self) -> Result<usize, StoreError> {
        let conn = self.conn()?;
        let expired = store::expired_conversations(&conn, Utc::now(), self.default_retention_days)?;
        let removed = store::delete_conversations(&conn, &expired)?;
        if removed > 0 {
            crate::metrics::RETENTION_DELETED_TOTAL.inc_by(removed as u64);
        }
        info!(removed, "retention sweep complete");
        Ok(removed)
    }

    /// Aggregate statistics over the archive.
    pub fn network_stats(&self) -> Result<NetworkStatistics, StoreError> {
        let conn = self.conn()?;
        let week_ago = Utc::now() - chrono::Duration::days(7);
        Ok(NetworkStatistics {
            total_conversations: store::count_conversations(&conn)?,
            consent_breakdown: store::consent_breakdown(&conn)?,
            active_sessions_7_days: store::active_sessions_since(&conn, week_ago)?,
            wisdom_patterns_count: store::count_patterns(&conn)?,
            collective_insights_count: store::count_insights(&conn)?,
            top_themes: store::top_themes(&conn, TOP_THEME_COUNT)?,
        })
    }
}

/// "meaning_purpose" -> "Meaning Purpose"
fn title_case(theme: &str) -> String {
    theme
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
