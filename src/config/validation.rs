//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check the role/downstream pairing
//! - Validate value ranges (timeouts > 0, addresses parse)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ChainConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;
use url::Url;

use crate::chain::ServiceRole;
use crate::config::schema::ChainConfig;

/// A single semantic problem with a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("invalid bind address '{0}'")]
    BindAddress(String),

    #[error("{0} service must not have a downstream")]
    UnexpectedDownstream(ServiceRole),

    #[error("{0} service requires a downstream")]
    MissingDownstream(ServiceRole),

    #[error("invalid downstream url '{url}': {reason}")]
    DownstreamUrl { url: String, reason: String },

    #[error("downstream path '{0}' must start with '/'")]
    DownstreamPath(String),

    #[error("downstream timeout must be greater than zero")]
    ZeroTimeout,

    #[error("invalid metrics address '{0}'")]
    MetricsAddress(String),
}

/// Validate a configuration, collecting every error.
pub fn validate_config(config: &ChainConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    let role = config.role();

    let bind_address = config.service.bind_address();
    if bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::BindAddress(bind_address));
    }

    match (&config.downstream, role.is_leaf()) {
        (Some(_), true) => errors.push(ValidationError::UnexpectedDownstream(role)),
        (None, false) => errors.push(ValidationError::MissingDownstream(role)),
        (Some(downstream), false) => {
            match Url::parse(&downstream.base_url) {
                Ok(url) if matches!(url.scheme(), "http" | "https") => {}
                Ok(url) => errors.push(ValidationError::DownstreamUrl {
                    url: downstream.base_url.clone(),
                    reason: format!("unsupported scheme '{}'", url.scheme()),
                }),
                Err(e) => errors.push(ValidationError::DownstreamUrl {
                    url: downstream.base_url.clone(),
                    reason: e.to_string(),
                }),
            }
            if !downstream.path.starts_with('/') {
                errors.push(ValidationError::DownstreamPath(downstream.path.clone()));
            }
            if downstream.timeout_ms == 0 {
                errors.push(ValidationError::ZeroTimeout);
            }
        }
        (None, true) => {}
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::MetricsAddress(
            config.observability.metrics_address.clone(),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
