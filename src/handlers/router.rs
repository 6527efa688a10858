//! Router configuration.
//!
//! Routes are split into public (health checks, metrics - must stay
//! reachable for probes and scraping) and protected (everything under
//! /api, which the caller wraps with auth and rate limiting).

use axum::{
    routing::{get, post},
    Router,
};

use super::state::SharedContext;
use super::{accounts, chat, collective, consent, governance, health, marketplace, worth};

/// Routes that require no authentication.
pub fn build_public_routes(ctx: SharedContext) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/live", get(health::health_live))
        .route("/health/ready", get(health::health_ready))
        .route("/metrics", get(health::metrics_endpoint))
        .with_state(ctx)
}

/// API routes. The caller applies the auth middleware and rate limiter.
pub fn build_protected_routes(ctx: SharedContext) -> Router {
    Router::new()
        // persona chat
        .route("/api/chat/sarah", post(chat::chat_sarah))
        .route("/api/chat/steven", post(chat::chat_steven))
        .route("/api/collective/commune", post(chat::commune))
        // consent registry
        .route("/api/consent", post(consent::update_consent))
        .route("/api/consent/{session_id}", get(consent::get_consent))
        // collective wisdom
        .route("/api/collective/insights", get(collective::list_insights))
        .route("/api/collective/patterns", get(collective::list_patterns))
        .route("/api/collective/stats", get(collective::network_stats))
        // maintenance
        .route("/api/maintenance/sweep", post(collective::run_sweep))
        // accounts
        .route("/api/register", post(accounts::register))
        .route("/api/login", post(accounts::login))
        // WORTH ledger
        .route("/api/worth/balance", get(worth::get_balance))
        .route("/api/worth/transfer", post(worth::transfer))
        // governance
        .route("/api/governance/proposals", get(governance::list_proposals))
        .route("/api/governance/propose", post(governance::create_proposal))
        .route("/api/governance/vote", post(governance::vote))
        // marketplace
        .route("/api/marketplace/listings", get(marketplace::list_listings))
        .route("/api/marketplace/list", post(marketplace::create_listing))
        .with_state(ctx)
}

/// Complete router without auth or rate limiting applied.
pub fn build_router(ctx: SharedContext) -> Router {
    let public = build_public_routes(ctx.clone());
    let protected = build_protected_routes(ctx);
    Router::new().merge(public).merge(protected)
}
