//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Hop calls its downstream:
//!     → timeouts.rs (enforce the per-call deadline)
//!     → On any failure: the hop answers degraded, no retry
//! ```
//!
//! # Design Decisions
//! - Timeouts are non-negotiable; every outbound call has a deadline
//! - A failed call is final for that hop

pub mod timeouts;

pub use timeouts::{bounded, TimedOut};
