//! # HTTP Request Tracing Middleware
//!
//! Axum middleware that wraps each request in a tracing span and records
//! Prometheus request counters and latency.

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::Instrument;

use super::metrics::record_http_request;

/// Axum middleware that traces and measures each HTTP request
pub async fn trace_http_requests(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let uri = request.uri().path().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|matched| matched.as_str().to_string())
        .unwrap_or_else(|| normalize_path_for_metrics(&uri));
    let start = Instant::now();

    let span = crate::request_span!(method, uri, route = %route);
    let response = next.run(request).instrument(span.clone()).await;

    let status_code = response.status().as_u16();
    let elapsed = start.elapsed();

    let elapsed_ms = elapsed.as_millis() as u64;
    span.in_scope(|| {
        if status_code >= 400 {
            tracing::debug!(status_code, elapsed_ms, "Request rejected");
        } else {
            tracing::debug!(status_code, elapsed_ms, "Request completed");
        }
    });

    record_http_request(&method, &route, status_code, elapsed.as_secs_f64()).await;

    response
}

/// Normalize path for metrics to avoid high cardinality
///
/// Used for requests that matched no route. Numeric segments become `{id}`
/// and the name segment of a cluster creation path becomes `{name}`.
fn normalize_path_for_metrics(path: &str) -> String {
    let segments: Vec<&str> = path.split('/').collect();
    let mut normalized = Vec::with_capacity(segments.len());

    for (i, segment) in segments.iter().enumerate() {
        let is_numeric = !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit());
        let follows_cluster_id =
            i >= 2 && segments[i - 2] == "cluster" && normalized.last() == Some(&"{id}");

        if is_numeric {
            normalized.push("{id}");
        } else if follows_cluster_id && !segment.is_empty() && *segment != "configuration" {
            normalized.push("{name}");
        } else {
            normalized.push(segment);
        }
    }

    normalized.join("/")
}
