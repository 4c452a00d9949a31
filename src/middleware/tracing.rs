//! Request tracing middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log each request with its status and latency
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let client_ip = client_ip(&request);

    let start = Instant::now();
    tracing::debug!(method = %method, path = %path, client_ip = ?client_ip, "Request started");

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status().as_u16();

    if response.status().is_server_error() {
        tracing::error!(method = %method, path = %path, status, duration_ms, "Request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(method = %method, path = %path, status, duration_ms, "Request rejected");
    } else {
        tracing::info!(method = %method, path = %path, status, duration_ms, "Request completed");
    }

    response
}

/// First hop of `X-Forwarded-For`, else `X-Real-IP`
fn client_ip(request: &Request) -> Option<String> {
    let headers = request.headers();

    headers
        .get("x-forwarded-for")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|h| h.to_str().ok())
                .map(|s| s.to_string())
        })
}
