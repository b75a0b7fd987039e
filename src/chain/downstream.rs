//! Outbound call to a hop's single downstream dependency.
//!
//! # Responsibilities
//! - Forward `msg` and the correlation identifier
//! - Bound the whole exchange (connect, status, body) by the configured timeout
//! - Collapse every failure into [`CallResult::Unavailable`]
//!
//! # Failure Taxonomy
//! ```text
//! deadline elapsed        → Timeout
//! connect/transport error → Connect / Request
//! non-2xx status          → Status
//! body not a JSON object  → Decode
//! ```

use std::time::Duration;
use url::Url;

use crate::chain::correlation::{CorrelationId, CORRELATION_HEADER};
use crate::chain::envelope::{CallResult, Payload};
use crate::config::DownstreamConfig;
use crate::resilience::timeouts::bounded;

/// Errors that can occur while calling a downstream service.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DownstreamError {
    /// Outbound call exceeded the configured bound.
    #[error("downstream timed out after {0} ms")]
    Timeout(u64),

    /// Connection-level failure.
    #[error("downstream unreachable: {0}")]
    Connect(String),

    /// Request could not be sent or the body could not be read.
    #[error("downstream request failed: {0}")]
    Request(String),

    /// Downstream answered with a non-2xx status.
    #[error("downstream returned status {0} {1}")]
    Status(u16, String),

    /// Body did not decode into a JSON object.
    #[error("downstream returned malformed body: {0}")]
    Decode(String),

    /// Client could not be constructed from configuration.
    #[error("invalid downstream configuration: {0}")]
    Setup(String),
}

impl DownstreamError {
    fn from_reqwest(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            DownstreamError::Timeout(timeout.as_millis() as u64)
        } else if err.is_connect() {
            DownstreamError::Connect(err.to_string())
        } else {
            DownstreamError::Request(err.to_string())
        }
    }
}

/// HTTP client bound to one downstream endpoint.
///
/// The inner `reqwest::Client` pools connections; nothing about a call
/// depends on earlier calls.
#[derive(Debug, Clone)]
pub struct DownstreamClient {
    client: reqwest::Client,
    target: Url,
    timeout: Duration,
}

impl DownstreamClient {
    /// Build a client from configuration.
    pub fn new(config: &DownstreamConfig) -> Result<Self, DownstreamError> {
        // Plain concatenation: a path on the base address is kept.
        let joined = format!("{}{}", config.base_url.trim_end_matches('/'), config.path);
        let target =
            Url::parse(&joined).map_err(|e| DownstreamError::Setup(format!("{}: {}", joined, e)))?;

        let client = reqwest::Client::builder()
            .no_proxy()
            .build()
            .map_err(|e| DownstreamError::Setup(e.to_string()))?;

        Ok(Self {
            client,
            target,
            timeout: Duration::from_millis(config.timeout_ms),
        })
    }

    /// Full URL of the downstream endpoint.
    pub fn target(&self) -> &Url {
        &self.target
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Call the downstream once. Never retries and never returns a fault.
    pub async fn call(&self, correlation_id: &CorrelationId, message: &str) -> CallResult {
        match self.try_call(correlation_id, message).await {
            Ok(payload) => CallResult::Success(payload),
            Err(e) => CallResult::Unavailable(e.to_string()),
        }
    }

    /// Call the downstream once, keeping the failure classification.
    pub async fn try_call(
        &self,
        correlation_id: &CorrelationId,
        message: &str,
    ) -> Result<Payload, DownstreamError> {
        let mut request = self.client.get(self.target.clone()).query(&[("msg", message)]);
        match correlation_id.header_value() {
            Some(value) => request = request.header(CORRELATION_HEADER, value.clone()),
            None => tracing::warn!(
                correlation_id = %correlation_id,
                "Correlation id is not a valid header value, not forwarded"
            ),
        }

        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| DownstreamError::from_reqwest(e, self.timeout))?;

            let status = response.status();
            if !status.is_success() {
                return Err(DownstreamError::Status(
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default().to_string(),
                ));
            }

            let body = response
                .bytes()
                .await
                .map_err(|e| DownstreamError::from_reqwest(e, self.timeout))?;

            serde_json::from_slice::<Payload>(&body)
                .map_err(|e| DownstreamError::Decode(e.to_string()))
        };

        bounded(self.timeout, exchange)
            .await
            .map_err(|elapsed| DownstreamError::Timeout(elapsed.after.as_millis() as u64))?
    }
}
