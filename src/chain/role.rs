//! Service roles in the C → B → A chain.
//!
//! Every role is the same handler shape; only the static identity differs.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Position of a service in the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceRole {
    /// Service A: terminal node, answers immediately.
    Leaf,
    /// Service B: calls the leaf.
    Middle,
    /// Service C: entry point, calls the middle service.
    Root,
}

impl ServiceRole {
    pub const ALL: [ServiceRole; 3] = [ServiceRole::Leaf, ServiceRole::Middle, ServiceRole::Root];

    /// Short service identity used in log records (`service=A`).
    pub fn service_name(self) -> &'static str {
        match self {
            ServiceRole::Leaf => "A",
            ServiceRole::Middle => "B",
            ServiceRole::Root => "C",
        }
    }

    /// Path of the business endpoint this role exposes.
    pub fn endpoint(self) -> &'static str {
        match self {
            ServiceRole::Leaf => "/echo",
            ServiceRole::Middle => "/call-echo",
            ServiceRole::Root => "/process",
        }
    }

    /// Envelope field carrying this service's own status marker.
    /// The leaf's envelope has none.
    pub fn status_field(self) -> Option<&'static str> {
        match self {
            ServiceRole::Leaf => None,
            ServiceRole::Middle => Some("service_b"),
            ServiceRole::Root => Some("service_c"),
        }
    }

    /// Envelope field carrying the downstream payload or the `"unavailable"` marker.
    pub fn downstream_field(self) -> Option<&'static str> {
        match self {
            ServiceRole::Leaf => None,
            ServiceRole::Middle => Some("service_a"),
            ServiceRole::Root => Some("downstream"),
        }
    }

    /// The role this one calls, if any.
    pub fn downstream_role(self) -> Option<ServiceRole> {
        match self {
            ServiceRole::Leaf => None,
            ServiceRole::Middle => Some(ServiceRole::Leaf),
            ServiceRole::Root => Some(ServiceRole::Middle),
        }
    }

    /// Fixed local port of the role.
    pub fn default_port(self) -> u16 {
        match self {
            ServiceRole::Leaf => 8080,
            ServiceRole::Middle => 8081,
            ServiceRole::Root => 8082,
        }
    }

    /// Outbound call bound. The root waits longer since it covers the whole
    /// remaining chain.
    pub fn default_timeout_ms(self) -> Option<u64> {
        match self {
            ServiceRole::Leaf => None,
            ServiceRole::Middle => Some(1_000),
            ServiceRole::Root => Some(2_000),
        }
    }

    pub fn is_leaf(self) -> bool {
        matches!(self, ServiceRole::Leaf)
    }
}

impl fmt::Display for ServiceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ServiceRole::Leaf => "leaf",
            ServiceRole::Middle => "middle",
            ServiceRole::Root => "root",
        };
        f.write_str(s)
    }
}

/// Error returned when a role name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown service role '{0}' (expected leaf|middle|root or a|b|c)")]
pub struct UnknownRole(pub String);

impl FromStr for ServiceRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "leaf" | "a" => Ok(ServiceRole::Leaf),
            "middle" | "b" => Ok(ServiceRole::Middle),
            "root" | "c" => Ok(ServiceRole::Root),
            _ => Err(UnknownRole(s.to_string())),
        }
    }
}
