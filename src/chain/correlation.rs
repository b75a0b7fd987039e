//! Correlation identifier resolution.
//!
//! The first service a request reaches either adopts the caller's
//! `X-Correlation-ID` or mints a UUID v4. Every later hop receives the
//! value on its inbound header and adopts it unchanged.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use std::fmt;
use uuid::Uuid;

/// Header carrying the correlation identifier on every inbound and outbound request.
pub const CORRELATION_HEADER: &str = "x-correlation-id";

/// Typed form of [`CORRELATION_HEADER`].
pub static CORRELATION_HEADER_NAME: HeaderName = HeaderName::from_static(CORRELATION_HEADER);

/// Where a correlation identifier came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// Arrived on the inbound request.
    Supplied,
    /// Minted at this hop.
    Generated,
}

/// Opaque token threading one logical request through the chain. Never mutated.
///
/// `value` is the text written to logs and response bodies; `header` holds the
/// exact bytes forwarded downstream, so non-ASCII ids travel unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorrelationId {
    value: String,
    header: Option<HeaderValue>,
    origin: Origin,
}

impl CorrelationId {
    /// Adopt a caller-supplied value.
    pub fn supplied(value: impl Into<String>) -> Self {
        let value = value.into();
        Self {
            header: HeaderValue::from_bytes(value.as_bytes()).ok(),
            value,
            origin: Origin::Supplied,
        }
    }

    /// Adopt an inbound header value byte-for-byte.
    pub fn from_header(header: &HeaderValue) -> Self {
        Self {
            value: String::from_utf8_lossy(header.as_bytes()).into_owned(),
            header: Some(header.clone()),
            origin: Origin::Supplied,
        }
    }

    /// Mint a fresh, globally-unique identifier.
    pub fn generate() -> Self {
        let value = Uuid::new_v4().to_string();
        Self {
            header: HeaderValue::from_str(&value).ok(),
            value,
            origin: Origin::Generated,
        }
    }

    /// Resolve the identifier for an inbound request. Never fails.
    ///
    /// A header that is missing or empty counts as absent.
    pub fn resolve(headers: &HeaderMap) -> Self {
        headers
            .get(&CORRELATION_HEADER_NAME)
            .filter(|v| !v.is_empty())
            .map(Self::from_header)
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Bytes to send on the outbound header. `None` only for hand-built ids
    /// containing control characters.
    pub fn header_value(&self) -> Option<&HeaderValue> {
        self.header.as_ref()
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }
}

impl fmt::Display for CorrelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}
