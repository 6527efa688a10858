//! Account handlers: registration and login.

use axum::{extract::State, response::Json};
use serde::{Deserialize, Serialize};

use super::state::SharedContext;
use crate::errors::{AppError, ValidationErrorExt};
use crate::validation;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub user_id: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub user_id: String,
}

/// POST /api/register
pub async fn register(
    State(ctx): State<SharedContext>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    validation::validate_username(&req.username).map_validation_err("username")?;
    if req.password.is_empty() {
        return Err(AppError::InvalidInput {
            field: "password".to_string(),
            reason: "password cannot be empty".to_string(),
        });
    }

    let user_id = ctx.platform.register(&req.username, &req.email, &req.password)?;
    Ok(Json(RegisterResponse {
        success: true,
        user_id,
    }))
}

/// POST /api/login
pub async fn login(
    State(ctx): State<SharedContext>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let user_id = ctx.platform.login(&req.username, &req.password)?;
    Ok(Json(LoginResponse {
        success: true,
        user_id,
    }))
}
