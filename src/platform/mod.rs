//! Flat-file platform state: accounts, the WORTH ledger, governance
//! proposals, and marketplace listings.
//!
//! Each collection lives in its own JSON document under the data
//! directory. A missing file reads as empty; every mutation rewrites the
//! owning file. No cross-file transactions and no retries - a write
//! failure propagates to the caller.

pub mod types;

pub use types::*;

use argon2::password_hash::{rand_core::OsRng, PasswordHash, SaltString};
use argon2::{Argon2, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use parking_lot::RwLock;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

const USERS_FILE: &str = "users.json";
const BALANCES_FILE: &str = "worth_balances.json";
const PROPOSALS_FILE: &str = "proposals.json";
const MARKETPLACE_FILE: &str = "marketplace.json";

/// WORTH granted to every new account.
pub const WELCOME_BONUS: i64 = 100;

#[derive(Debug, thiserror::Error)]
pub enum PlatformError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("username already exists: {0}")]
    UsernameTaken(String),

    #[error("invalid credentials")]
    InvalidCredentials,

    #[error("invalid transfer amount: {0}")]
    InvalidAmount(i64),

    #[error("proposal not found: {0}")]
    ProposalNotFound(String),

    #[error("already voted on proposal: {0}")]
    AlreadyVoted(String),

    #[error("credential hashing failed: {0}")]
    Credential(String),
}

pub type Result<T> = std::result::Result<T, PlatformError>;

fn load_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T> {
    match fs::read_to_string(path) {
        Ok(raw) => Ok(serde_json::from_str(&raw)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(T::default()),
        Err(e) => Err(e.into()),
    }
}

/// In-memory platform state with JSON-file persistence.
pub struct PlatformStore {
    data_dir: PathBuf,
    users: RwLock<HashMap<String, UserAccount>>,
    balances: RwLock<HashMap<String, i64>>,
    proposals: RwLock<Vec<Proposal>>,
    listings: RwLock<Vec<Listing>>,
}

impl PlatformStore {
    /// Load platform state from the data directory, creating it if needed.
    pub fn open(data_dir: impl Into<PathBuf>) -> Result<Self> {
        let data_dir = data_dir.into();
        fs::create_dir_all(&data_dir)?;
        let store = Self {
            users: RwLock::new(load_or_default(&data_dir.join(USERS_FILE))?),
            balances: RwLock::new(load_or_default(&data_dir.join(BALANCES_FILE))?),
            proposals: RwLock::new(load_or_default(&data_dir.join(PROPOSALS_FILE))?),
            listings: RwLock::new(load_or_default(&data_dir.join(MARKETPLACE_FILE))?),
            data_dir,
        };
        info!(
            users = store.users.read().len(),
            proposals = store.proposals.read().len(),
            listings = store.listings.read().len(),
            "platform store loaded"
        );
        Ok(store)
    }

    fn persist<T: Serialize>(&self, file: &str, value: &T) -> Result<()> {
        fs::write(
            self.data_dir.join(file),
            serde_json::to_string_pretty(value)?,
        )?;
        Ok(())
    }

    // -- accounts ----------------------------------------------------------

    /// Create an account and seed its WORTH balance. Returns the user id.
    pub fn register(&self, username: &str, email: &str, password: &str) -> Result<String> {
        let mut users = self.users.write();
        if users.values().any(|u| u.username == username) {
            return Err(PlatformError::UsernameTaken(username.to_string()));
        }

        let user_id = Uuid::new_v4().to_string();
        users.insert(
            user_id.clone(),
            UserAccount {
                username: username.to_string(),
                email: email.to_string(),
                password_hash: hash_password(password)?,
                created_at: Utc::now(),
                profile: UserProfile::default(),
            },
        );

        let mut balances = self.balances.write();
        balances.insert(user_id.clone(), WELCOME_BONUS);

        self.persist(USERS_FILE, &*users)?;
        self.persist(BALANCES_FILE, &*balances)?;
        info!(username, "account registered");
        Ok(user_id)
    }

    /// Verify credentials and return the user id.
    pub fn login(&self, username: &str, password: &str) -> Result<String> {
        let users = self.users.read();
        let (user_id, account) = users
            .iter()
            .find(|(_, u)| u.username == username)
            .ok_or(PlatformError::InvalidCredentials)?;
        verify_password(password, &account.password_hash)?;
        Ok(user_id.clone())
    }

    // -- WORTH ledger ------------------------------------------------------

    /// A user's balance; unknown users hold 0.
    pub fn balance(&self, user_id: &str) -> i64 {
        *self.balances.read().get(user_id).unwrap_or(&0)
    }

    /// Move WORTH between users. The amount must be positive and covered by
    /// the sender's balance. Returns the sender's new balance.
    pub fn transfer(&self, from: &str, to: &str, amount: i64) -> Result<i64> {
        let mut balances = self.balances.write();
        let current = *balances.get(from).unwrap_or(&0);
        if amount <= 0 || amount > current {
            return Err(PlatformError::InvalidAmount(amount));
        }
        balances.insert(from.to_string(), current - amount);
        *balances.entry(to.to_string()).or_insert(0) += amount;
        self.persist(BALANCES_FILE, &*balances)?;
        Ok(current - amount)
    }

    // -- governance --------------------------------------------------------

    pub fn create_proposal(
        &self,
        proposer: &str,
        title: &str,
        description: &str,
    ) -> Result<String> {
        let mut proposals = self.proposals.write();
        let id = Uuid::new_v4().to_string();
        proposals.push(Proposal {
            id: id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            proposer: proposer.to_string(),
            created_at: Utc::now(),
            votes_for: 0,
            votes_against: 0,
            voters: Vec::new(),
            status: "active".to_string(),
        });
        self.persist(PROPOSALS_FILE, &*proposals)?;
        Ok(id)
    }

    /// Record one vote per user per proposal.
    pub fn vote(&self, proposal_id: &str, voter: &str, choice: VoteChoice) -> Result<()> {
        let mut proposals = self.proposals.write();
        let proposal = proposals
            .iter_mut()
            .find(|p| p.id == proposal_id)
            .ok_or_else(|| PlatformError::ProposalNotFound(proposal_id.to_string()))?;

        if proposal.voters.iter().any(|v| v == voter) {
            return Err(PlatformError::AlreadyVoted(proposal_id.to_string()));
        }

        match choice {
            VoteChoice::For => proposal.votes_for += 1,
            VoteChoice::Against => proposal.votes_against += 1,
        }
        proposal.voters.push(voter.to_string());
        self.persist(PROPOSALS_FILE, &*proposals)?;
        Ok(())
    }

    pub fn proposals(&self) -> Vec<Proposal> {
        self.proposals.read().clone()
    }

    // -- marketplace -------------------------------------------------------

    pub fn create_listing(
        &self,
        seller: &str,
        title: &str,
        description: &str,
        data_type: &str,
        price_worth: i64,
    ) -> Result<String> {
        let mut listings = self.listings.write();
        let id = Uuid::new_v4().to_string();
        listings.push(Listing {
            id: id.clone(),
            title: title.to_string(),
            description: description.to_string(),
            data_type: data_type.to_string(),
            price_worth,
            seller: seller.to_string(),
            created_at: Utc::now(),
            status: "active".to_string(),
        });
        self.persist(MARKETPLACE_FILE, &*listings)?;
        Ok(id)
    }

    pub fn listings(&self) -> Vec<Listing> {
        self.listings.read().clone()
    }
}

fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| PlatformError::Credential(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> Result<()> {
    let parsed = PasswordHash::new(hash).map_err(|e| PlatformError::Credential(e.to_string()))?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .map_err(|_| PlatformError::InvalidCredentials)
}
