//! Request extraction.
//!
//! # Responsibilities
//! - Pull the `msg` query parameter into a typed value once, at handler entry
//! - Default a missing parameter to the empty string
//!
//! # Design Decisions
//! - Extraction never rejects: `msg` is opaque text and is not validated
//! - A repeated `msg` keeps its first occurrence

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use std::convert::Infallible;
use url::form_urlencoded;

/// Name of the single business parameter.
pub const MESSAGE_PARAM: &str = "msg";

/// The free-text message carried through the chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Message(pub String);

impl Message {
    /// Extract from a raw query string. `None` and a missing `msg` both yield `""`.
    pub fn from_query(query: Option<&str>) -> Self {
        let value = query
            .and_then(|q| {
                form_urlencoded::parse(q.as_bytes())
                    .find(|(key, _)| key == MESSAGE_PARAM)
                    .map(|(_, value)| value.into_owned())
            })
            .unwrap_or_default();
        Self(value)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<S> FromRequestParts<S> for Message
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self::from_query(parts.uri.query()))
    }
}
