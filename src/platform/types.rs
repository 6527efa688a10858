//! Platform record types persisted as flat JSON documents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account. The password is stored only as an argon2 PHC hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserAccount {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub profile: UserProfile,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub bio: String,
    pub interests: Vec<String>,
    pub contributions: Vec<String>,
}

/// A governance proposal with its running tally.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Proposal {
    pub id: String,
    pub title: String,
    pub description: String,
    pub proposer: String,
    pub created_at: DateTime<Utc>,
    pub votes_for: u64,
    pub votes_against: u64,
    pub voters: Vec<String>,
    pub status: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    For,
    Against,
}

/// A marketplace listing priced in WORTH.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Listing {
    pub id: String,
    pub title: String,
    pub description: String,
    pub data_type: String,
    pub price_worth: i64,
    pub seller: String,
    pub created_at: DateTime<Utc>,
    pub status: String,
}
