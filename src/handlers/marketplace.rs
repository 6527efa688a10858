//! Marketplace handlers.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use super::state::SharedContext;
use crate::errors::AppError;
use crate::platform::Listing;

#[derive(Debug, Serialize)]
pub struct ListingsResponse {
    pub success: bool,
    pub listings: Vec<Listing>,
    pub count: usize,
}

#[derive(Debug, Deserialize)]
pub struct CreateListingRequest {
    pub user_id: String,
    pub title: String,
    pub description: String,
    pub data_type: String,
    pub price_worth: i64,
}

#[derive(Debug, Serialize)]
pub struct CreateListingResponse {
    pub success: bool,
    pub listing_id: String,
}

/// GET /api/marketplace/listings
pub async fn list_listings(State(ctx): State<SharedContext>) -> Json<ListingsResponse> {
    let listings = ctx.platform.listings();
    let count = listings.len();
    Json(ListingsResponse {
        success: true,
        listings,
        count,
    })
}

/// POST /api/marketplace/list
pub async fn create_listing(
    State(ctx): State<SharedContext>,
    Json(req): Json<CreateListingRequest>,
) -> Result<Json<CreateListingResponse>, AppError> {
    if req.title.trim().is_empty() {
        return Err(AppError::InvalidInput {
            field: "title".to_string(),
            reason: "title cannot be empty".to_string(),
        });
    }
    if req.price_worth < 0 {
        return Err(AppError::InvalidInput {
            field: "price_worth".to_string(),
            reason: "price cannot be negative".to_string(),
        });
    }

    let listing_id = ctx.platform.create_listing(
        &req.user_id,
        &req.title,
        &req.description,
        &req.data_type,
        req.price_worth,
    )?;
    Ok(Json(CreateListingResponse {
        success: true,
        listing_id,
    }))
}
