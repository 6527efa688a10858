//! HTTP request tracking middleware.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Record latency and counts for every request.
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = normalize_path(req.uri().path());

    let response = next.run(req).await;

    let status = response.status().as_u16().to_string();
    crate::metrics::HTTP_REQUEST_DURATION
        .with_label_values(&[&method, &path])
        .observe(start.elapsed().as_secs_f64());
    crate::metrics::HTTP_REQUESTS_TOTAL
        .with_label_values(&[&method, &path, &status])
        .inc();

    response
}

/// Collapse dynamic path segments so metric cardinality stays bounded:
/// `/api/consent/session-42` -> `/api/consent/{id}`.
fn normalize_path(path: &str) -> String {
    let normalized: Vec<&str> = path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .map(|segment| if looks_like_id(segment) { "{id}" } else { segment })
        .collect();
    format!("/{}", normalized.join("/"))
}

fn looks_like_id(segment: &str) -> bool {
    // UUIDs
    if segment.len() >= 32 && segment.contains('-') {
        return true;
    }
    // purely numeric
    if !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit()) {
        return true;
    }
    // long opaque tokens
    if segment.len() > 24 {
        return true;
    }
    // identifier-shaped segments with digits (session-3, user_42)
    segment.chars().any(|c| c.is_ascii_digit())
        && segment
            .chars()
            .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
}
