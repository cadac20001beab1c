//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_requests_total` (counter): requests by method, route, status
//! - `gateway_request_duration_seconds` (histogram): latency distribution
//! - `gateway_signature_rejections_total` (counter): 403s by signed message
//! - `gateway_transactions_total` (counter): writes by kind and outcome
//! - `gateway_rpc_health` (gauge): 1=reachable, 0=unreachable
//!
//! Recording is a no-op until [`init_metrics`] installs the exporter.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with its own HTTP listener.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    let method = method.to_string();
    let route = route.to_string();
    let status = status.to_string();
    ::metrics::counter!(
        "gateway_requests_total",
        "method" => method.clone(),
        "route" => route.clone(),
        "status" => status
    )
    .increment(1);
    ::metrics::histogram!(
        "gateway_request_duration_seconds",
        "method" => method,
        "route" => route
    )
    .record(start.elapsed().as_secs_f64());
}

pub fn record_signature_rejected(message: &'static str) {
    ::metrics::counter!("gateway_signature_rejections_total", "message" => message).increment(1);
}

pub fn record_transaction(kind: &'static str, outcome: &'static str) {
    ::metrics::counter!("gateway_transactions_total", "kind" => kind, "outcome" => outcome)
        .increment(1);
}

pub fn record_rpc_health(healthy: bool) {
    ::metrics::gauge!("gateway_rpc_health").set(if healthy { 1.0 } else { 0.0 });
}
