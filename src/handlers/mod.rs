//! HTTP API handlers, organized by domain.

pub mod router;
pub mod state;

pub mod health;

pub mod chat;
pub mod collective;
pub mod consent;

pub mod accounts;
pub mod governance;
pub mod marketplace;
pub mod worth;

pub use router::{build_protected_routes, build_public_routes, build_router};
pub use state::{AppContext, SharedContext};
