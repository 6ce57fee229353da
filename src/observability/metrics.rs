//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): responses by route, status
//! - `gateway_upstream_requests_total` (counter): upstream calls by operation, outcome
//! - `gateway_upstream_duration_seconds` (histogram): upstream latency by operation
//! - `gateway_sessions_active` (gauge): sessions held in memory
//! - `gateway_auth_rejections_total` (counter): gate rejections by strategy
//!
//! Recording is a no-op until a recorder is installed, so library code and
//! tests can call these freely.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(route: &str, status: u16) {
    metrics::counter!(
        "gateway_requests_total",
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

pub fn record_upstream(operation: &'static str, outcome: &'static str, started: Instant) {
    metrics::counter!(
        "gateway_upstream_requests_total",
        "operation" => operation,
        "outcome" => outcome
    )
    .increment(1);
    metrics::histogram!("gateway_upstream_duration_seconds", "operation" => operation)
        .record(started.elapsed().as_secs_f64());
}

pub fn record_sessions(active: usize) {
    metrics::gauge!("gateway_sessions_active").set(active as f64);
}

pub fn record_auth_rejection(strategy: &'static str) {
    metrics::counter!("gateway_auth_rejections_total", "strategy" => strategy).increment(1);
}
