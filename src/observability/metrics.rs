//! Metrics collection and exposition.
//!
//! # Metrics
//! - `pathgate_resolutions_total` (counter): lookups by outcome (static, resolved, not_found)
//! - `pathgate_method_rejections_total` (counter): gate rejections by request method (GET, POST, PUT, DELETE or other)
//! - `pathgate_static_routes` (gauge): static table size, including cached resolutions

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};
use std::net::SocketAddr;

/// Install the Prometheus recorder and its scrape endpoint.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

pub fn record_resolution(outcome: &'static str) {
    metrics::counter!("pathgate_resolutions_total", "outcome" => outcome).increment(1);
}

pub fn record_method_rejection(method: &'static str) {
    metrics::counter!("pathgate_method_rejections_total", "method" => method).increment(1);
}

pub fn record_static_routes(count: usize) {
    metrics::gauge!("pathgate_static_routes").set(count as f64);
}
