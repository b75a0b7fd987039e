//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, /health + business route)
//!     → request.rs (typed `msg` extraction)
//!     → chain::ChainedHandler (one hop)
//!     → response.rs (envelope → 200 / 503 JSON)
//!     → Send to client
//! ```

pub mod request;
pub mod response;
pub mod server;

pub use request::Message;
pub use response::HealthStatus;
pub use server::{ChainServer, ServerError};
