//! The propagated call chain.
//!
//! # Data Flow
//! ```text
//! client → C (/process) → B (/call-echo) → A (/echo)
//!
//! At every hop:
//!     correlation.rs (adopt X-Correlation-ID or mint one)
//!     → handler.rs (leaf answers; others call downstream.rs)
//!     → envelope.rs (wrap payload or "unavailable" + error)
//! ```
//!
//! # Design Decisions
//! - One handler type, instantiated per role (role.rs)
//! - Downstream failures never cross a service boundary as faults
//! - No state survives a request

pub mod correlation;
pub mod downstream;
pub mod envelope;
pub mod handler;
pub mod role;

pub use correlation::{CorrelationId, Origin, CORRELATION_HEADER};
pub use downstream::{DownstreamClient, DownstreamError};
pub use envelope::{CallResult, Payload, ResponseEnvelope, STATUS_OK, UNAVAILABLE};
pub use handler::ChainedHandler;
pub use role::ServiceRole;
