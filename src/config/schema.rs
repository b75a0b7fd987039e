//! Configuration schema definitions.
//!
//! This module defines the configuration of a single service in the chain.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::chain::ServiceRole;

/// Root configuration for one chain service.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ChainConfig {
    /// Which service this process is, and where it listens.
    pub service: ServiceConfig,

    /// The single dependency this service calls. `None` for the leaf.
    pub downstream: Option<DownstreamConfig>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl ChainConfig {
    /// Static defaults for a role: fixed local port, downstream address and timeout.
    pub fn for_role(role: ServiceRole) -> Self {
        Self {
            service: ServiceConfig::for_role(role),
            downstream: DownstreamConfig::for_role(role),
            observability: ObservabilityConfig::default(),
        }
    }

    pub fn role(&self) -> ServiceRole {
        self.service.role
    }
}

impl Default for ChainConfig {
    fn default() -> Self {
        Self::for_role(ServiceRole::Leaf)
    }
}

/// Service identity and listener.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ServiceConfig {
    /// Position in the chain.
    pub role: ServiceRole,

    /// Bind address (e.g., "127.0.0.1:8080"). Defaults to the role's fixed local port.
    pub bind_address: Option<String>,
}

impl ServiceConfig {
    pub fn for_role(role: ServiceRole) -> Self {
        Self {
            role,
            bind_address: None,
        }
    }

    /// Effective bind address.
    pub fn bind_address(&self) -> String {
        self.bind_address
            .clone()
            .unwrap_or_else(|| format!("127.0.0.1:{}", self.role.default_port()))
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self::for_role(ServiceRole::Leaf)
    }
}

/// Downstream dependency.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct DownstreamConfig {
    /// Base address (e.g., "http://127.0.0.1:8080").
    pub base_url: String,

    /// Path of the downstream business endpoint (e.g., "/echo").
    pub path: String,

    /// Per-call timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

fn default_timeout_ms() -> u64 {
    1_000
}

impl DownstreamConfig {
    /// Defaults pointing at the role's fixed downstream. `None` for the leaf.
    pub fn for_role(role: ServiceRole) -> Option<Self> {
        let target = role.downstream_role()?;
        Some(Self {
            base_url: format!("http://127.0.0.1:{}", target.default_port()),
            path: target.endpoint().to_string(),
            timeout_ms: role.default_timeout_ms().unwrap_or_else(default_timeout_ms),
        })
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Human-readable or JSON log lines.
    pub log_format: LogFormat,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "127.0.0.1:9090".to_string(),
        }
    }
}
