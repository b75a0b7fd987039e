//! Timeout enforcement.
//!
//! # Responsibilities
//! - Bound the single outbound call of a hop
//! - Abandon the call once the deadline passes
//!
//! # Design Decisions
//! - Uses Tokio's timeout facilities
//! - Timeout errors are distinct from other errors
//! - Dropping the inner future cancels the in-flight request

use std::future::Future;
use std::time::Duration;

/// The deadline elapsed before the operation completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("operation timed out after {} ms", .after.as_millis())]
pub struct TimedOut {
    pub after: Duration,
}

/// Run `fut` to completion or give up after `limit`.
pub async fn bounded<F, T>(limit: Duration, fut: F) -> Result<T, TimedOut>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| TimedOut { after: limit })
}
