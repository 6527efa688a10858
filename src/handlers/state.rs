//! Application context shared across handlers.
//!
//! All collaborators are constructed once at startup and injected
//! explicitly; there is no module-level shared state.

use std::sync::Arc;

use crate::config::ServerConfig;
use crate::memory::CollectiveMemory;
use crate::persona::{SarahResponder, StevenResponder};
use crate::platform::PlatformStore;

pub struct AppContext {
    pub memory: CollectiveMemory,
    pub platform: PlatformStore,
    pub sarah: SarahResponder,
    pub steven: StevenResponder,
    pub config: ServerConfig,
}

/// Handler state type alias.
pub type SharedContext = Arc<AppContext>;

impl AppContext {
    /// Build the full context from configuration: creates the data
    /// directory, opens the archive database, and loads platform state.
    pub fn new(config: ServerConfig) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.data_dir)?;
        let memory = CollectiveMemory::new(config.db_path(), config.default_retention_days)?;
        let platform = PlatformStore::open(&config.data_dir)?;
        Ok(Self {
            memory,
            platform,
            sarah: SarahResponder::new(),
            steven: StevenResponder::new(),
            config,
        })
    }
}
