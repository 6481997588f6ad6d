//! Logging middleware
//!
//! Records HTTP request and response information

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;
use tracing::{info, Instrument};
use uuid::Uuid;

/// Request logging middleware
///
/// Tags each request with an id and records method, path, status, and latency
pub async fn request_logging(request: Request, next: Next) -> Response {
    let start_time = Instant::now();
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let span = tracing::info_span!(
        "http_request",
        request_id = %request_id,
        method = %method,
        path = %path,
    );

    async move {
        info!("Request started: {} {}", method, path);

        let response = next.run(request).await;

        info!(
            "Request completed: {} {} - {} in {:?}",
            method,
            path,
            response.status(),
            start_time.elapsed()
        );

        response
    }
    .instrument(span)
    .await
}
