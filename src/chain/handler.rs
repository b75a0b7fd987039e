//! Chained endpoint handler: one hop of the chain.
//!
//! # Flow
//! ```text
//! Received → resolve correlation id
//!     Leaf:     answer {echo, correlation_id}
//!     Non-leaf: call downstream → Success  → answer
//!                               → failure  → answer degraded
//! → log hop record (exactly once) → return
//! ```
//!
//! The handler is a stateless function of (request, static config); the
//! same value serves concurrent requests.

use axum::http::HeaderMap;
use std::time::Instant;

use crate::chain::correlation::CorrelationId;
use crate::chain::downstream::{DownstreamClient, DownstreamError};
use crate::chain::envelope::ResponseEnvelope;
use crate::chain::role::ServiceRole;
use crate::config::ChainConfig;
use crate::observability::{logging, metrics};

/// Reusable hop logic, parameterized by role and downstream.
#[derive(Debug, Clone)]
pub struct ChainedHandler {
    role: ServiceRole,
    downstream: Option<DownstreamClient>,
}

impl ChainedHandler {
    /// Terminal handler with no downstream.
    pub fn leaf() -> Self {
        Self {
            role: ServiceRole::Leaf,
            downstream: None,
        }
    }

    /// Handler that forwards to `downstream`.
    pub fn chained(role: ServiceRole, downstream: DownstreamClient) -> Self {
        Self {
            role,
            downstream: Some(downstream),
        }
    }

    /// Build the handler for a validated configuration.
    pub fn from_config(config: &ChainConfig) -> Result<Self, DownstreamError> {
        let role = config.role();
        if role.is_leaf() {
            return Ok(Self::leaf());
        }

        let downstream = config
            .downstream
            .as_ref()
            .ok_or_else(|| DownstreamError::Setup(format!("{} service requires a downstream", role)))?;

        Ok(Self::chained(role, DownstreamClient::new(downstream)?))
    }

    pub fn role(&self) -> ServiceRole {
        self.role
    }

    pub fn downstream(&self) -> Option<&DownstreamClient> {
        self.downstream.as_ref()
    }

    /// Execute one hop for an inbound request.
    pub async fn handle(&self, headers: &HeaderMap, message: &str) -> ResponseEnvelope {
        let start = Instant::now();
        let correlation_id = CorrelationId::resolve(headers);

        let envelope = match &self.downstream {
            None => ResponseEnvelope::echo(correlation_id, message),
            Some(client) => {
                let result = client.call(&correlation_id, message).await;
                ResponseEnvelope::chained(self.role, correlation_id, result)
            }
        };

        let elapsed = start.elapsed();
        logging::log_hop(self.role, &envelope, elapsed);
        metrics::record_hop(self.role, logging::outcome_status(&envelope), elapsed);

        envelope
    }
}
