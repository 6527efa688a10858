//! Governance handlers: proposals and voting.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use super::state::SharedContext;
use crate::errors::AppError;
use crate::platform::{Proposal, VoteChoice};

#[derive(Debug, Serialize)]
pub struct ProposalsResponse {
    pub success: bool,
    pub proposals: Vec<Proposal>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct ProposeRequest {
    pub user_id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Serialize)]
pub struct ProposeResponse {
    pub success: bool,
    pub proposal_id: String,
}

#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    pub user_id: String,
    pub proposal_id: String,
    pub vote: VoteChoice,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub success: bool,
}

/// GET /api/governance/proposals
pub async fn list_proposals(State(ctx): State<SharedContext>) -> Json<ProposalsResponse> {
    let proposals = ctx.platform.proposals();
    let count = proposals.len();
    Json(ProposalsResponse {
        success: true,
        proposals,
        count,
    })
}

/// POST /api/governance/propose
pub async fn create_proposal(
    State(ctx): State<SharedContext>,
    Json(req): Json<ProposeRequest>,
) -> Result<Json<ProposeResponse>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::InvalidInput {
            field: "title".to_string(),
            reason: "title cannot be empty".to_string(),
        });
    }

    let proposal_id = ctx
        .platform
        .create_proposal(&req.user_id, &req.title, &req.description)?;
    Ok(Json(ProposeResponse {
        success: true,
        proposal_id,
    }))
}

/// POST /api/governance/vote
pub async fn vote(
    State(ctx): State<SharedContext>,
    Json(req): Json<VoteRequest>,
) -> Result<Json<VoteResponse>, AppError> {
    ctx.platform.vote(&req.proposal_id, &req.user_id, req.vote)?;
    Ok(Json(VoteResponse { success: true }))
}
