//! Metrics collection and exposition.
//!
//! # Metrics
//! - `wikispace_requests_total` (counter): requests by route and status
//! - `wikispace_request_duration_seconds` (histogram): latency by route
//! - `wikispace_upstream_fetches_total` (counter): origin fetches by outcome
//! - `wikispace_upstream_retries_total` (counter): retries issued
//!
//! Recording is a no-op until [`init_metrics`] installs a recorder.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one served request.
pub fn record_request(route: &'static str, status: u16, start: Instant) {
    counter!(
        "wikispace_requests_total",
        "route" => route,
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("wikispace_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one origin fetch attempt.
pub fn record_fetch(outcome: &'static str) {
    counter!("wikispace_upstream_fetches_total", "outcome" => outcome).increment(1);
}

/// Record a retry issued by the retry policy.
pub fn record_retry() {
    counter!("wikispace_upstream_retries_total").increment(1);
}
