//! API-key authentication for protected routes.
//!
//! Keys come from `SYNTHSARA_API_KEYS` (comma-separated). Production mode
//! refuses requests when no keys are configured; development mode falls
//! back to a fixed key with a warning.

use axum::{
    extract::Request,
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::env;

const DEV_FALLBACK_KEY: &str = "synthsara-dev-key";

#[derive(Debug)]
pub enum AuthError {
    MissingApiKey,
    InvalidApiKey,
    NotConfigured,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::MissingApiKey => (StatusCode::UNAUTHORIZED, "Missing X-API-Key header"),
            AuthError::InvalidApiKey => (StatusCode::UNAUTHORIZED, "Invalid API key"),
            AuthError::NotConfigured => (
                StatusCode::SERVICE_UNAVAILABLE,
                "API keys not configured. Set SYNTHSARA_API_KEYS.",
            ),
        };
        (status, message).into_response()
    }
}

/// Constant-time equality over the shorter length. Leaks only length
/// inequality, which is acceptable for API keys.
fn constant_time_eq(a: &str, b: &str) -> bool {
    let mut diff = (a.len() ^ b.len()) as u8;
    let a = a.as_bytes();
    let b = b.as_bytes();
    for i in 0..a.len().min(b.len()) {
        diff |= a[i] ^ b[i];
    }
    diff == 0
}

/// Check one provided key against the configured set.
pub fn validate_api_key(provided: &str) -> Result<(), AuthError> {
    let configured = match env::var("SYNTHSARA_API_KEYS") {
        Ok(keys) if !keys.trim().is_empty() => keys,
        _ => {
            let is_production = env::var("SYNTHSARA_ENV")
                .map(|v| {
                    let v = v.to_lowercase();
                    v == "production" || v == "prod"
                })
                .unwrap_or(false);

            if is_production {
                tracing::error!("SYNTHSARA_API_KEYS not set in production mode");
                return Err(AuthError::NotConfigured);
            }

            tracing::warn!("SYNTHSARA_API_KEYS not set - using development key");
            DEV_FALLBACK_KEY.to_string()
        }
    };

    // Check every key so timing does not reveal which one matched
    let mut found = false;
    for key in configured.split(',') {
        if constant_time_eq(key.trim(), provided) {
            found = true;
        }
    }

    if found {
        Ok(())
    } else {
        Err(AuthError::InvalidApiKey)
    }
}

/// Middleware requiring a valid `X-API-Key` header.
pub async fn require_api_key(request: Request, next: Next) -> Response {
    let provided = match request
        .headers()
        .get("X-API-Key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
    {
        Some(key) => key,
        None => return AuthError::MissingApiKey.into_response(),
    };

    if let Err(e) = validate_api_key(&provided) {
        return e.into_response();
    }

    next.run(request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq("abc", "abc"));
        assert!(!constant_time_eq("abc", "abd"));
        assert!(!constant_time_eq("abc", "abcd"));
        assert!(!constant_time_eq("", "x"));
        assert!(constant_time_eq("", ""));
    }

    #[test]
    fn test_configured_keys_accepted() {
        env::set_var("SYNTHSARA_API_KEYS", "key-one, key-two");
        assert!(validate_api_key("key-one").is_ok());
        assert!(validate_api_key("key-two").is_ok());
        assert!(validate_api_key("key-three").is_err());
        env::remove_var("SYNTHSARA_API_KEYS");
    }
}
