//! Collective wisdom handlers: insights, patterns, statistics, and the
//! retention sweep trigger.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::state::SharedContext;
use crate::errors::{AppError, ValidationErrorExt};
use crate::memory::{CollectiveInsight, NetworkStatistics, WisdomPattern};
use crate::validation;

fn default_insights_limit() -> usize {
    10
}

fn default_patterns_limit() -> usize {
    20
}

#[derive(Debug, Deserialize)]
pub struct InsightsQuery {
    #[serde(default = "default_insights_limit")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct InsightsResponse {
    pub success: bool,
    pub insights: Vec<CollectiveInsight>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct PatternsQuery {
    pub theme: Option<String>,
    #[serde(default = "default_patterns_limit")]
    pub limit: usize,
}

#[derive(Debug, Serialize)]
pub struct PatternsResponse {
    pub success: bool,
    pub patterns: Vec<WisdomPattern>,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SweepResponse {
    pub success: bool,
    pub removed: usize,
}

/// GET /api/collective/insights
pub async fn list_insights(
    State(ctx): State<SharedContext>,
    Query(query): Query<InsightsQuery>,
) -> Result<Json<InsightsResponse>, AppError> {
    validation::validate_limit(query.limit).map_validation_err("limit")?;

    let insights = ctx.memory.insights(query.limit)?;
    let count = insights.len();
    Ok(Json(InsightsResponse {
        success: true,
        insights,
        count,
    }))
}

/// GET /api/collective/patterns
pub async fn list_patterns(
    State(ctx): State<SharedContext>,
    Query(query): Query<PatternsQuery>,
) -> Result<Json<PatternsResponse>, AppError> {
    validation::validate_limit(query.limit).map_validation_err("limit")?;

    let patterns = ctx.memory.patterns(query.theme.as_deref(), query.limit)?;
    let count = patterns.len();
    Ok(Json(PatternsResponse {
        success: true,
        patterns,
        count,
    }))
}

/// GET /api/collective/stats
pub async fn network_stats(
    State(ctx): State<SharedContext>,
) -> Result<Json<NetworkStatistics>, AppError> {
    Ok(Json(ctx.memory.network_stats()?))
}

/// POST /api/maintenance/sweep - delete conversations past their session's
/// retention window. Invoked by an operator or external scheduler.
pub async fn run_sweep(State(ctx): State<SharedContext>) -> Result<Json<SweepResponse>, AppError> {
    let removed = ctx.memory.sweep_expired()?;
    Ok(Json(SweepResponse {
        success: true,
        removed,
    }))
}
