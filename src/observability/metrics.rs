//! Metrics collection and exposition.
//!
//! # Metrics
//! - `simplejson_requests_total` (counter): requests by method, endpoint, status
//! - `simplejson_request_duration_seconds` (histogram): latency distribution
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed with [`init_metrics`].

use std::net::SocketAddr;
use std::time::Instant;

use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter, serving scrapes on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one completed request.
pub fn record_request(method: &str, endpoint: &str, status: u16, start: Instant) {
    metrics::counter!(
        "simplejson_requests_total",
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    metrics::histogram!(
        "simplejson_request_duration_seconds",
        "method" => method.to_string(),
        "endpoint" => endpoint.to_string(),
        "status" => status.to_string()
    )
    .record(start.elapsed().as_secs_f64());
}

/// Middleware timing every routed request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let endpoint = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_owned())
        .unwrap_or_else(|| request.uri().path().to_owned());
    let method = request.method().to_string();

    let response = next.run(request).await;

    let status = response.status().as_u16();
    tracing::debug!(method = %method, endpoint = %endpoint, status, elapsed = ?start.elapsed(), "Request completed");
    record_request(&method, &endpoint, status, start);
    response
}
