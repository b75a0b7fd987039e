//! Structured logging.
//!
//! # Responsibilities
//! - Initialize the tracing subscriber once per process
//! - Emit the per-invocation hop record
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for machine parsing, pretty format for development
//! - Log level configurable via config and `RUST_LOG`

use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::chain::{ResponseEnvelope, ServiceRole};
use crate::config::{LogFormat, ObservabilityConfig};

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
pub fn init_logging(config: &ObservabilityConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "service_chain={level},tower_http={level}",
            level = config.log_level
        )
        .into()
    });

    let registry = tracing_subscriber::registry().with(filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Hop outcome as written to the log record.
pub fn outcome_status(envelope: &ResponseEnvelope) -> &'static str {
    if envelope.is_degraded() {
        "error"
    } else {
        "ok"
    }
}

/// Emit the single log record for one business invocation.
pub fn log_hop(role: ServiceRole, envelope: &ResponseEnvelope, elapsed: Duration) {
    let latency_ms = elapsed.as_millis() as u64;
    let status = outcome_status(envelope);

    match envelope.error() {
        Some(error) => tracing::info!(
            service = role.service_name(),
            endpoint = role.endpoint(),
            correlation_id = %envelope.correlation_id(),
            status,
            error,
            latency_ms,
            "hop completed"
        ),
        None => tracing::info!(
            service = role.service_name(),
            endpoint = role.endpoint(),
            correlation_id = %envelope.correlation_id(),
            status,
            latency_ms,
            "hop completed"
        ),
    }
}
