//! Structured error handling with machine-readable codes.
//!
//! Every API failure surfaces as a JSON body with a stable code, a human
//! message, and the matching HTTP status.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::memory::StoreError;
use crate::platform::PlatformError;

/// Error body returned to API clients.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Application error types, categorized by the status they map to.
#[derive(Debug)]
pub enum AppError {
    // 400
    InvalidInput { field: String, reason: String },
    InvalidTransfer(String),

    // 401
    InvalidCredentials,

    // 404
    ProposalNotFound(String),

    // 409
    UsernameTaken(String),
    AlreadyVoted(String),

    // 500
    DatabaseError(String),
    StorageError(String),
    Internal(anyhow::Error),
}

impl AppError {
    /// Stable code for client-side error identification.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::InvalidTransfer(_) => "INVALID_TRANSFER",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::ProposalNotFound(_) => "PROPOSAL_NOT_FOUND",
            Self::UsernameTaken(_) => "USERNAME_TAKEN",
            Self::AlreadyVoted(_) => "ALREADY_VOTED",
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::StorageError(_) => "STORAGE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidInput { .. } | Self::InvalidTransfer(_) => StatusCode::BAD_REQUEST,

            Self::InvalidCredentials => StatusCode::UNAUTHORIZED,

            Self::ProposalNotFound(_) => StatusCode::NOT_FOUND,

            Self::UsernameTaken(_) | Self::AlreadyVoted(_) => StatusCode::CONFLICT,

            Self::DatabaseError(_) | Self::StorageError(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    pub fn message(&self) -> String {
        match self {
            Self::InvalidInput { field, reason } => {
                format!("Invalid input for field '{field}': {reason}")
            }
            Self::InvalidTransfer(msg) => format!("Invalid transfer: {msg}"),
            Self::InvalidCredentials => "Invalid credentials".to_string(),
            Self::ProposalNotFound(id) => format!("Proposal not found: {id}"),
            Self::UsernameTaken(name) => format!("Username already exists: {name}"),
            Self::AlreadyVoted(id) => format!("Already voted on proposal: {id}"),
            Self::DatabaseError(msg) => format!("Database error: {msg}"),
            Self::StorageError(msg) => format!("Storage error: {msg}"),
            Self::Internal(err) => format!("Internal error: {err}"),
        }
    }

    pub fn to_body(&self) -> ErrorBody {
        ErrorBody {
            code: self.code().to_string(),
            message: self.message(),
            details: None,
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err)
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        Self::DatabaseError(err.to_string())
    }
}

impl From<PlatformError> for AppError {
    fn from(err: PlatformError) -> Self {
        match err {
            PlatformError::UsernameTaken(name) => Self::UsernameTaken(name),
            PlatformError::InvalidCredentials => Self::InvalidCredentials,
            PlatformError::InvalidAmount(amount) => {
                Self::InvalidTransfer(format!("amount {amount} is not available"))
            }
            PlatformError::ProposalNotFound(id) => Self::ProposalNotFound(id),
            PlatformError::AlreadyVoted(id) => Self::AlreadyVoted(id),
            PlatformError::Io(_) | PlatformError::Serialization(_) | PlatformError::Credential(_) => {
                Self::StorageError(err.to_string())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self.to_body())).into_response()
    }
}

/// Converts validation failures into field-tagged input errors.
pub trait ValidationErrorExt<T> {
    fn map_validation_err(self, field: &str) -> Result<T>;
}

impl<T> ValidationErrorExt<T> for anyhow::Result<T> {
    fn map_validation_err(self, field: &str) -> Result<T> {
        self.map_err(|e| AppError::InvalidInput {
            field: field.to_string(),
            reason: e.to_string(),
        })
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
