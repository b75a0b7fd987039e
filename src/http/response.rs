//! Response mapping.
//!
//! # Responsibilities
//! - Serialize envelopes as JSON
//! - Map a degraded envelope to 503, everything else to 200
//!
//! # Design Decisions
//! - The body is always a well-formed envelope, even on 503
//! - The envelope's own status marker stays "ok" on 503

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::chain::{ResponseEnvelope, STATUS_OK};

/// Body of `/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

impl HealthStatus {
    pub fn ok() -> Self {
        Self {
            status: STATUS_OK.to_string(),
        }
    }
}

/// HTTP status for an envelope.
pub fn status_for(envelope: &ResponseEnvelope) -> StatusCode {
    if envelope.is_degraded() {
        StatusCode::SERVICE_UNAVAILABLE
    } else {
        StatusCode::OK
    }
}

impl IntoResponse for ResponseEnvelope {
    fn into_response(self) -> Response {
        (status_for(&self), Json(self)).into_response()
    }
}
