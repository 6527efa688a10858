//! Consent registry handlers.

use axum::{
    extract::{Path, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use super::state::SharedContext;
use crate::errors::{AppError, ValidationErrorExt};
use crate::memory::{ConsentLevel, ConsentPreference};
use crate::validation;

fn default_retention_days() -> i64 {
    30
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct UpdateConsentRequest {
    pub session_id: String,
    pub consent_level: ConsentLevel,
    #[serde(default = "default_retention_days")]
    pub data_retention_days: i64,
    #[serde(default)]
    pub collective_learning_enabled: bool,
    #[serde(default = "default_true")]
    pub anonymization_required: bool,
}

#[derive(Debug, Serialize)]
pub struct UpdateConsentResponse {
    pub success: bool,
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct GetConsentResponse {
    pub success: bool,
    pub consent: Option<ConsentPreference>,
}

/// POST /api/consent - upsert a session's consent preferences.
pub async fn update_consent(
    State(ctx): State<SharedContext>,
    Json(req): Json<UpdateConsentRequest>,
) -> Result<Json<UpdateConsentResponse>, AppError> {
    validation::validate_session_id(&req.session_id).map_validation_err("session_id")?;
    if req.data_retention_days < 1 {
        return Err(AppError::InvalidInput {
            field: "data_retention_days".to_string(),
            reason: "must be at least 1".to_string(),
        });
    }

    ctx.memory.update_consent(
        &req.session_id,
        req.consent_level,
        req.data_retention_days,
        req.collective_learning_enabled,
        req.anonymization_required,
    )?;

    Ok(Json(UpdateConsentResponse {
        success: true,
        session_id: req.session_id,
    }))
}

/// GET /api/consent/{session_id} - a session's registered preferences.
pub async fn get_consent(
    State(ctx): State<SharedContext>,
    Path(session_id): Path<String>,
) -> Result<Json<GetConsentResponse>, AppError> {
    validation::validate_session_id(&session_id).map_validation_err("session_id")?;

    let consent = ctx.memory.consent(&session_id)?;
    Ok(Json(GetConsentResponse {
        success: consent.is_some(),
        consent,
    }))
}
