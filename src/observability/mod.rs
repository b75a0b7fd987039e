//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Chained endpoint handler, once per invocation:
//!     → logging.rs (hop record: service, endpoint, correlation_id, status, latency_ms)
//!     → metrics.rs (counter + latency histogram)
//!
//! tower-http TraceLayer:
//!     → request spans for every route, including /health
//! ```
//!
//! # Design Decisions
//! - Correlation ID appears on every hop record
//! - Metrics are cheap and optional

pub mod logging;
pub mod metrics;

pub use logging::{init_logging, log_hop};
