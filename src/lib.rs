//! Three-service call chain (C → B → A) with correlation-id propagation
//! and degraded responses on downstream failure.

pub mod chain;
pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod resilience;

pub use chain::{ChainedHandler, CorrelationId, ResponseEnvelope, ServiceRole};
pub use config::ChainConfig;
pub use http::ChainServer;
pub use lifecycle::Shutdown;
