//! WORTH ledger handlers.

use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::state::SharedContext;
use crate::errors::AppError;

#[derive(Debug, Deserialize)]
pub struct BalanceQuery {
    pub user_id: String,
}

#[derive(Debug, Serialize)]
pub struct BalanceResponse {
    pub user_id: String,
    pub balance: i64,
}

#[derive(Debug, Deserialize)]
pub struct TransferRequest {
    pub user_id: String,
    pub recipient: String,
    pub amount: i64,
}

#[derive(Debug, Serialize)]
pub struct TransferResponse {
    pub success: bool,
    pub new_balance: i64,
}

/// GET /api/worth/balance?user_id=...
pub async fn get_balance(
    State(ctx): State<SharedContext>,
    Query(query): Query<BalanceQuery>,
) -> Json<BalanceResponse> {
    let balance = ctx.platform.balance(&query.user_id);
    Json(BalanceResponse {
        user_id: query.user_id,
        balance,
    })
}

/// POST /api/worth/transfer
pub async fn transfer(
    State(ctx): State<SharedContext>,
    Json(req): Json<TransferRequest>,
) -> Result<Json<TransferResponse>, AppError> {
    let new_balance = ctx
        .platform
        .transfer(&req.user_id, &req.recipient, req.amount)?;
    Ok(Json(TransferResponse {
        success: true,
        new_balance,
    }))
}
