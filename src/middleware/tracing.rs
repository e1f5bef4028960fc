//! Request tracing middleware

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Log every request with its status and latency
pub async fn request_tracing(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    let duration_ms = start.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        tracing::error!(%method, %path, status, duration_ms, "Request failed");
    } else if response.status().is_client_error() {
        tracing::warn!(%method, %path, status, duration_ms, "Request rejected");
    } else {
        tracing::info!(%method, %path, status, duration_ms, "Request completed");
    }

    response
}
