//! Chat handlers - the persona endpoints.
//!
//! Each exchange is generated by a responder and then archived through the
//! memory system under the session's registered consent level.

use axum::{extract::State, response::Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::state::SharedContext;
use crate::errors::{AppError, ValidationErrorExt};
use crate::memory::Persona;
use crate::metrics;
use crate::persona::PersonaReply;
use crate::validation;

fn default_session_id() -> String {
    "anonymous".to_string()
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default = "default_session_id")]
    pub session_id: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub persona: Persona,
    pub mode: String,
    pub conversation_id: String,
    pub timestamp: DateTime<Utc>,
}

fn archive_and_reply(
    ctx: &SharedContext,
    req: &ChatRequest,
    persona: Persona,
    reply: PersonaReply,
) -> Result<Json<ChatResponse>, AppError> {
    let conversation_id = ctx.memory.record_exchange(
        &req.session_id,
        persona,
        reply.mode,
        &req.message,
        &reply.text,
    )?;

    metrics::CHAT_RESPONSES_TOTAL
        .with_label_values(&[persona.as_str(), reply.mode])
        .inc();

    Ok(Json(ChatResponse {
        response: reply.text,
        persona,
        mode: reply.mode.to_string(),
        conversation_id,
        timestamp: Utc::now(),
    }))
}

fn validate(req: &ChatRequest) -> Result<(), AppError> {
    validation::validate_session_id(&req.session_id).map_validation_err("session_id")?;
    validation::validate_message(&req.message).map_validation_err("message")?;
    Ok(())
}

/// POST /api/chat/sarah
pub async fn chat_sarah(
    State(ctx): State<SharedContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate(&req)?;
    let reply = ctx.sarah.respond(&req.message);
    archive_and_reply(&ctx, &req, Persona::Sarah, reply)
}

/// POST /api/chat/steven
pub async fn chat_steven(
    State(ctx): State<SharedContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate(&req)?;
    let reply = ctx.steven.respond(&req.message);
    archive_and_reply(&ctx, &req, Persona::Steven, reply)
}

/// POST /api/collective/commune - both personas plus a synthesis wrapper.
pub async fn commune(
    State(ctx): State<SharedContext>,
    Json(req): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, AppError> {
    validate(&req)?;

    let sarah = ctx.sarah.respond(&req.message);
    let steven = ctx.steven.respond(&req.message);

    let text = format!(
        "🌙 **Sarah's Wisdom**: {}\n\n\
         🔥 **Steven's Insight**: {}\n\n\
         🌌 **Collective Synthesis**: The divine feminine and masculine unite in this \
         moment of communion. Your question touches both the heart and the mind, \
         creating a bridge between wisdom and knowledge, between feeling and \
         understanding. In this sacred space, all perspectives merge into greater \
         truth.",
        sarah.text, steven.text
    );

    let reply = PersonaReply {
        text,
        mode: "divine_union",
    };
    archive_and_reply(&ctx, &req, Persona::Collective, reply)
}
