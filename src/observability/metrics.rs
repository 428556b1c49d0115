//! Metrics collection and exposition.
//!
//! # Metrics
//! - `portal_requests_total` (counter): requests by route, method, outcome
//! - `portal_request_duration_seconds` (histogram): handler latency by route
//! - `portal_contract_calls_total` (counter): contract interactions by function, result
//! - `portal_contract_call_duration_seconds` (histogram): chain round-trip by function
//! - `portal_chain_healthy` (gauge): 1=node reachable, 0=unreachable
//!
//! Recording is a no-op until `init_metrics` installs the exporter.

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;
use std::time::Instant;

/// Install the Prometheus exporter with an HTTP scrape listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record a handled HTTP request.
pub fn record_request(route: &'static str, method: &str, outcome: &'static str, start: Instant) {
    ::metrics::counter!(
        "portal_requests_total",
        "route" => route,
        "method" => method.to_string(),
        "outcome" => outcome
    )
    .increment(1);
    ::metrics::histogram!("portal_request_duration_seconds", "route" => route)
        .record(start.elapsed().as_secs_f64());
}

/// Record one contract call or transaction.
pub fn record_contract_call(function: &'static str, success: bool, start: Instant) {
    let result = if success { "ok" } else { "error" };
    ::metrics::counter!(
        "portal_contract_calls_total",
        "function" => function,
        "result" => result
    )
    .increment(1);
    ::metrics::histogram!("portal_contract_call_duration_seconds", "function" => function)
        .record(start.elapsed().as_secs_f64());
}

/// Record the outcome of a chain health check.
pub fn record_chain_health(healthy: bool) {
    ::metrics::gauge!("portal_chain_healthy").set(if healthy { 1.0 } else { 0.0 });
}
