//! End-to-end tests for the conversation archive pipeline: consent gating,
//! anonymization, retention, and insight synthesis.

use chrono::{Duration, Utc};
use tempfile::TempDir;

use synthsara::memory::{
    store, ConsentLevel, ConversationRecord, CollectiveMemory, Persona,
};

fn archive() -> (CollectiveMemory, std::path::PathBuf, TempDir) {
    let dir = TempDir::new().expect("tempdir");
    let db_path = dir.path().join("collective_memory.db");
    let memory = CollectiveMemory::new(&db_path, 30).expect("open archive");
    (memory, db_path, dir)
}

// ── consent gating ──

#[test]
fn test_private_consent_stores_hashes_only() {
    let (memory, db_path, _dir) = archive();
    let id = memory
        .store_conversation(
            "s1",
            "healing my relationship",
            "reflect on this",
            Persona::Sarah,
            "heart_keeper",
            ConsentLevel::Private,
        )
        .expect("store");

    let conn = store::open(&db_path).expect("open db");
    let record = store::fetch_conversation(&conn, &id)
        .expect("fetch")
        .expect("found");
    assert_eq!(record.consent_level, ConsentLevel::Private);
    assert!(record.anonymized_hash.is_none());
    assert!(record.extracted_patterns.is_none());
    assert!(record.wisdom_contribution.is_none());
    // hashes present, never raw text
    assert_eq!(record.user_message_hash.len(), 64);
    assert_eq!(record.ai_response_hash.len(), 64);

    // nothing reached the pattern store
    assert!(memory.patterns(None, 20).expect("patterns").is_empty());
}

#[test]
fn test_anonymous_consent_adds_pair_hash_only() {
    let (memory, db_path, _dir) = archive();
    let id = memory
        .store_conversation(
            "s1",
            "healing my relationship",
            "reflect on this",
            Persona::Sarah,
            "heart_keeper",
            ConsentLevel::Anonymous,
        )
        .expect("store");

    let conn = store::open(&db_path).expect("open db");
    let record = store::fetch_conversation(&conn, &id)
        .expect("fetch")
        .expect("found");
    assert!(record.anonymized_hash.is_some());
    assert!(record.extracted_patterns.is_none());
    assert!(record.wisdom_contribution.is_none());
    assert!(memory.patterns(None, 20).expect("patterns").is_empty());
}

#[test]
fn test_collective_consent_populates_derived_fields() {
    let (memory, db_path, _dir) = archive();
    let id = memory
        .store_conversation(
            "s1",
            "healing my relationship",
            "reflect on this with compassion",
            Persona::Sarah,
            "heart_keeper",
            ConsentLevel::Collective,
        )
        .expect("store");

    let conn = store::open(&db_path).expect("open db");
    let record = store::fetch_conversation(&conn, &id)
        .expect("fetch")
        .expect("found");
    assert!(record.anonymized_hash.is_some());

    let patterns = record.extracted_patterns.expect("patterns populated");
    assert!(patterns.themes.contains(&"healing".to_string()));
    assert!(patterns.themes.contains(&"relationships".to_string()));

    let contribution = record.wisdom_contribution.expect("scores populated");
    assert!(contribution.novelty_score > 0.0);

    // the theme counters were fed
    let stored = memory.patterns(None, 20).expect("patterns");
    assert_eq!(stored.len(), 2);
    assert!(stored.iter().all(|p| p.frequency == 1));
}

#[test]
fn test_record_exchange_uses_registered_consent() {
    let (memory, db_path, _dir) = archive();

    // no consent row: private
    let id = memory
        .record_exchange("fresh", Persona::Steven, "oracle", "healing words", "reply")
        .expect("record");
    let conn = store::open(&db_path).expect("open db");
    let record = store::fetch_conversation(&conn, &id)
        .expect("fetch")
        .expect("found");
    assert_eq!(record.consent_level, ConsentLevel::Private);

    // registered collective consent flows through
    memory
        .update_consent("opted-in", ConsentLevel::Collective, 30, true, true)
        .expect("consent");
    let id = memory
        .record_exchange("opted-in", Persona::Steven, "oracle", "healing words", "reply")
        .expect("record");
    let record = store::fetch_conversation(&conn, &id)
        .expect("fetch")
        .expect("found");
    assert_eq!(record.consent_level, ConsentLevel::Collective);
    assert!(record.extracted_patterns.is_some());
}

// ── anonymization feeds the pair hash ──

#[test]
fn test_anonymized_hash_ignores_scrubbed_identifiers() {
    let (memory, db_path, _dir) = archive();
    let conn = store::open(&db_path).expect("open db");

    // same message modulo the email address: scrubbing makes the
    // anonymized hashes equal while the raw content hashes differ
    let id_a = memory
        .store_conversation(
            "s1",
            "contact me at alice@example.com",
            "ok",
            Persona::Sarah,
            "gentle_mirror",
            ConsentLevel::Anonymous,
        )
        .expect("store");
    let id_b = memory
        .store_conversation(
            "s1",
            "contact me at bob@elsewhere.org",
            "ok",
            Persona::Sarah,
            "gentle_mirror",
            ConsentLevel::Anonymous,
        )
        .expect("store");

    let a = store::fetch_conversation(&conn, &id_a).unwrap().unwrap();
    let b = store::fetch_conversation(&conn, &id_b).unwrap().unwrap();
    assert_ne!(a.user_message_hash, b.user_message_hash);
    assert_eq!(a.anonymized_hash, b.anonymized_hash);
}

// ── retention sweeper ──

fn backdated_record(id: &str, session: &str, days_old: i64) -> ConversationRecord {
    ConversationRecord {
        id: id.to_string(),
        session_id: session.to_string(),
        timestamp: Utc::now() - Duration::days(days_old),
        user_message_hash: "u".repeat(64),
        ai_response_hash: "r".repeat(64),
        ai_persona: Persona::Steven,
        ai_mode: "oracle".to_string(),
        consent_level: ConsentLevel::Private,
        anonymized_hash: None,
        extracted_patterns: None,
        wisdom_contribution: None,
    }
}

#[test]
fn test_sweep_respects_thirty_day_boundary() {
    let (memory, db_path, _dir) = archive();
    memory
        .update_consent("s1", ConsentLevel::Private, 30, false, true)
        .expect("consent");

    let conn = store::open(&db_path).expect("open db");
    store::insert_conversation(&conn, &backdated_record("old", "s1", 31)).expect("insert");
    store::insert_conversation(&conn, &backdated_record("recent", "s1", 29)).expect("insert");
    drop(conn);

    let removed = memory.sweep_expired().expect("sweep");
    assert_eq!(removed, 1);

    let conn = store::open(&db_path).expect("open db");
    assert!(store::fetch_conversation(&conn, "old").unwrap().is_none());
    assert!(store::fetch_conversation(&conn, "recent").unwrap().is_some());
}

#[test]
fn test_sweep_uses_per_session_retention() {
    let (memory, db_path, _dir) = archive();
    memory
        .update_consent("short", ConsentLevel::Private, 7, false, true)
        .expect("consent");

    let conn = store::open(&db_path).expect("open db");
    // 10 days old: expired for the 7-day session, kept for the default-30 one
    store::insert_conversation(&conn, &backdated_record("a", "short", 10)).expect("insert");
    store::insert_conversation(&conn, &backdated_record("b", "no-row", 10)).expect("insert");
    drop(conn);

    let removed = memory.sweep_expired().expect("sweep");
    assert_eq!(removed, 1);

    let conn = store::open(&db_path).expect("open db");
    assert!(store::fetch_conversation(&conn, "a").unwrap().is_none());
    assert!(store::fetch_conversation(&conn, "b").unwrap().is_some());
}

// ── insight synthesis ──

/// Drive the "healing" theme counter to the given frequency through the
/// collective pipeline.
fn observe_healing(memory: &CollectiveMemory, times: usize) {
    for _ in 0..times {
        memory
            .store_conversation(
                "s1",
                "I am focused on healing",
                "reply",
                Persona::Sarah,
                "heart_keeper",
                ConsentLevel::Collective,
            )
            .expect("store");
    }
}

#[test]
fn test_default_effectiveness_never_reaches_threshold() {
    let (memory, _db_path, _dir) = archive();
    observe_healing(&memory, 6);

    // frequency is well past 5, but effectiveness stays at the initial 0.5
    // and nothing recomputes it, so no insight can appear
    assert_eq!(memory.synthesize_insights().expect("synthesize"), 0);
    assert!(memory.insights(10).expect("insights").is_empty());
}

#[test]
fn test_synthesis_creates_exactly_one_insight_then_dedups() {
    let (memory, db_path, _dir) = archive();
    observe_healing(&memory, 5);

    // seed an effectiveness score past the threshold
    let conn = store::open(&db_path).expect("open db");
    conn.execute(
        "UPDATE wisdom_patterns SET effectiveness_score = 0.75 WHERE theme = 'healing'",
        [],
    )
    .expect("seed effectiveness");
    drop(conn);

    assert_eq!(memory.synthesize_insights().expect("first pass"), 1);
    assert_eq!(memory.synthesize_insights().expect("second pass"), 0);

    let insights = memory.insights(10).expect("insights");
    assert_eq!(insights.len(), 1);
    let insight = &insights[0];
    assert_eq!(insight.title, "Collective Wisdom: Healing");
    assert!(insight.description.contains("5 conversations"));
    assert_eq!(insight.supporting_patterns, vec!["healing".to_string()]);
    assert!((insight.confidence_score - 0.75).abs() < 1e-9);
    assert_eq!(insight.impact_potential, "community");
    assert_eq!(insight.ethical_review_status, "pending");
}

#[test]
fn test_further_observations_do_not_duplicate_insight() {
    let (memory, db_path, _dir) = archive();
    observe_healing(&memory, 5);

    let conn = store::open(&db_path).expect("open db");
    conn.execute(
        "UPDATE wisdom_patterns SET effectiveness_score = 0.75 WHERE theme = 'healing'",
        [],
    )
    .expect("seed effectiveness");
    drop(conn);

    // the ingest pipeline runs synthesis itself under collective consent
    observe_healing(&memory, 1);
    assert_eq!(memory.insights(10).expect("insights").len(), 1);

    observe_healing(&memory, 1);
    assert_eq!(memory.insights(10).expect("insights").len(), 1);
}

// ── statistics ──

#[test]
fn test_network_stats_aggregate() {
    let (memory, _db_path, _dir) = archive();
    memory
        .store_conversation("s1", "hi", "hello", Persona::Sarah, "gentle_mirror", ConsentLevel::Private)
        .expect("store");
    memory
        .store_conversation(
            "s2",
            "healing talk",
            "reply",
            Persona::Steven,
            "oracle",
            ConsentLevel::Collective,
        )
        .expect("store");

    let stats = memory.network_stats().expect("stats");
    assert_eq!(stats.total_conversations, 2);
    assert_eq!(stats.consent_breakdown.get("private"), Some(&1));
    assert_eq!(stats.consent_breakdown.get("collective"), Some(&1));
    assert_eq!(stats.active_sessions_7_days, 2);
    assert_eq!(stats.wisdom_patterns_count, 1);
    assert_eq!(stats.collective_insights_count, 0);
    assert_eq!(stats.top_themes[0].theme, "healing");
}
