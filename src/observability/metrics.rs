//! Metrics collection and exposition.
//!
//! # Metrics
//! - `calc_requests_total` (counter): requests by outcome
//! - `calc_request_duration_seconds` (histogram): handler latency
//! - `calc_body_bytes` (histogram): bytes read per body
//! - `calc_rejected_paths_total` (counter): requests stopped by the path guard
//!
//! Without an installed recorder every call here is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its scrape endpoint on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record one finished calculation request.
pub fn record_request(outcome: &'static str, start: Instant) {
    metrics::counter!("calc_requests_total", "outcome" => outcome).increment(1);
    metrics::histogram!("calc_request_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}

/// Record the size of a body that was read.
pub fn record_body_size(bytes: usize) {
    metrics::histogram!("calc_body_bytes").record(bytes as f64);
}

/// Record a request stopped by the path guard.
pub fn record_rejected_path() {
    metrics::counter!("calc_rejected_paths_total").increment(1);
}
