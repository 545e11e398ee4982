//! Prometheus metrics for bracket server health and activity.
//!
//! Metrics are exposed in Prometheus text format on a dedicated listener
//! when `METRICS_BIND` is configured. Recording without an installed
//! exporter is a no-op.
//!
//! # Metrics Categories
//!
//! - **HTTP Metrics**: Request counts and duration by method, route and status
//! - **Bracket Metrics**: Teams, joins, matches, scores and advancements
//! - **WebSocket Metrics**: Event feed connections
//!
//! # Example Usage
//!
//! ```rust,no_run
//! use cornhole_server::metrics;
//! use std::net::SocketAddr;
//!
//! let addr: SocketAddr = "127.0.0.1:9090".parse().unwrap();
//! metrics::init_metrics(addr).unwrap();
//!
//! metrics::http_requests_total("POST", "/t/{tid}/teams", 200);
//! metrics::teams_created_total();
//! ```

use metrics_exporter_prometheus::PrometheusBuilder;
use std::net::SocketAddr;

/// Initialize Prometheus metrics exporter.
///
/// Metrics will be available at `http://<addr>/metrics`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), String> {
    PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
        .map_err(|e| format!("Failed to install Prometheus exporter: {}", e))
}

// ============================================================================
// HTTP Metrics
// ============================================================================

/// Record HTTP request.
///
/// `path` should be the matched route template, not the raw URI, so that
/// tournament ids do not explode label cardinality.
pub fn http_requests_total(method: &str, path: &str, status: u16) {
    metrics::counter!("http_requests_total",
        "method" => method.to_string(),
        "path" => path.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Record HTTP request duration in milliseconds.
pub fn http_request_duration_ms(method: &str, path: &str, duration_ms: f64) {
    metrics::histogram!("http_request_duration_ms",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration_ms);
}

// ============================================================================
// Bracket Metrics
// ============================================================================

pub fn teams_created_total() {
    metrics::counter!("teams_created_total").increment(1);
}

pub fn players_joined_total() {
    metrics::counter!("players_joined_total").increment(1);
}

/// Increment matches created counter. Overwrites of an existing id count too.
pub fn matches_created_total() {
    metrics::counter!("matches_created_total").increment(1);
}

pub fn scores_submitted_total() {
    metrics::counter!("scores_submitted_total").increment(1);
}

pub fn winners_advanced_total() {
    metrics::counter!("winners_advanced_total").increment(1);
}

/// Set number of tournaments referenced since startup.
pub fn tournaments_tracked(count: usize) {
    metrics::gauge!("tournaments_tracked").set(count as f64);
}

// ============================================================================
// WebSocket Metrics
// ============================================================================

/// Increment total event feed connections counter.
pub fn websocket_connections_total() {
    metrics::counter!("websocket_connections_total").increment(1);
}

/// Increment events pushed to WebSocket clients.
pub fn websocket_messages_sent() {
    metrics::counter!("websocket_messages_sent").increment(1);
}
