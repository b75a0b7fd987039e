//! Metrics collection and exposition.
//!
//! # Metrics
//! - `chain_hop_requests_total` (counter): business invocations by service, endpoint, status
//! - `chain_hop_duration_seconds` (histogram): hop latency including the downstream call
//!
//! # Design Decisions
//! - Recorded next to the hop log record, never affecting the response
//! - Exporter is opt-in; without it the macros are no-ops

use std::net::SocketAddr;
use std::time::Duration;

use metrics_exporter_prometheus::PrometheusBuilder;

use crate::chain::ServiceRole;

/// Install the Prometheus exporter listening on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), metrics_exporter_prometheus::BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record one hop invocation.
pub fn record_hop(role: ServiceRole, status: &'static str, elapsed: Duration) {
    let service = role.service_name();
    let endpoint = role.endpoint();

    metrics::counter!(
        "chain_hop_requests_total",
        "service" => service,
        "endpoint" => endpoint,
        "status" => status
    )
    .increment(1);

    metrics::histogram!(
        "chain_hop_duration_seconds",
        "service" => service,
        "endpoint" => endpoint
    )
    .record(elapsed.as_secs_f64());
}
