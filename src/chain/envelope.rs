//! Call results and response envelopes.

use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_json::{Map, Value};

use crate::chain::correlation::CorrelationId;
use crate::chain::role::ServiceRole;

/// Decoded JSON object returned by a downstream service.
pub type Payload = Map<String, Value>;

/// Status marker a service reports for itself and for its `/health` check.
pub const STATUS_OK: &str = "ok";

/// Marker placed in the downstream field when the call failed.
pub const UNAVAILABLE: &str = "unavailable";

/// Outcome of one hop's attempt to reach its downstream.
///
/// The first terminal outcome is final; nothing is retried.
#[derive(Debug, Clone, PartialEq)]
pub enum CallResult {
    /// 2xx status and a body that decoded as a JSON object.
    Success(Payload),
    /// Timeout, connection failure, non-2xx status, or undecodable body.
    Unavailable(String),
}

impl CallResult {
    pub fn is_success(&self) -> bool {
        matches!(self, CallResult::Success(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Body {
    Echo(String),
    Downstream(CallResult),
}

/// Value a service returns to its own caller.
///
/// The service's own status marker is always `"ok"`; only the nested
/// downstream field reflects a failed dependency.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    role: ServiceRole,
    correlation_id: CorrelationId,
    body: Body,
}

impl ResponseEnvelope {
    /// Leaf answer: `{"echo": msg, "correlation_id": id}`.
    pub fn echo(correlation_id: CorrelationId, message: impl Into<String>) -> Self {
        Self {
            role: ServiceRole::Leaf,
            correlation_id,
            body: Body::Echo(message.into()),
        }
    }

    /// Wrap a downstream outcome for a middle or root service.
    pub fn chained(role: ServiceRole, correlation_id: CorrelationId, result: CallResult) -> Self {
        debug_assert!(!role.is_leaf(), "leaf services have no downstream");
        Self {
            role,
            correlation_id,
            body: Body::Downstream(result),
        }
    }

    pub fn role(&self) -> ServiceRole {
        self.role
    }

    pub fn correlation_id(&self) -> &CorrelationId {
        &self.correlation_id
    }

    /// True when the downstream call failed. Never true for the leaf.
    pub fn is_degraded(&self) -> bool {
        matches!(self.body, Body::Downstream(CallResult::Unavailable(_)))
    }

    /// Failure reason carried by a degraded envelope.
    pub fn error(&self) -> Option<&str> {
        match &self.body {
            Body::Downstream(CallResult::Unavailable(reason)) => Some(reason),
            _ => None,
        }
    }

    pub fn to_json(&self) -> Value {
        // Serializing a map of strings and JSON values into a Value cannot fail.
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

impl Serialize for ResponseEnvelope {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match &self.body {
            Body::Echo(message) => {
                let mut map = serializer.serialize_map(Some(2))?;
                map.serialize_entry("echo", message)?;
                map.serialize_entry("correlation_id", self.correlation_id.as_str())?;
                map.end()
            }
            Body::Downstream(result) => {
                let status_field = self.role.status_field().unwrap_or("status");
                let downstream_field = self.role.downstream_field().unwrap_or("downstream");
                let len = if result.is_success() { 3 } else { 4 };
                let mut map = serializer.serialize_map(Some(len))?;
                map.serialize_entry(status_field, STATUS_OK)?;
                match result {
                    CallResult::Success(payload) => {
                        map.serialize_entry(downstream_field, payload)?;
                    }
                    CallResult::Unavailable(reason) => {
                        map.serialize_entry(downstream_field, UNAVAILABLE)?;
                        map.serialize_entry("error", reason)?;
                    }
                }
                map.serialize_entry("correlation_id", self.correlation_id.as_str())?;
                map.end()
            }
        }
    }
}
