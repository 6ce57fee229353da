//! Record-store integration subsystem.
//!
//! # Data Flow
//! ```text
//! handler
//!     → client.rs (URL building, timeout, status check)
//!     → record-store HTTP API
//!     → types.rs (typed bodies, UpstreamError)
//! ```
//!
//! # Constraints
//! - Every call is bounded by `upstream.timeout_secs`
//! - No retries: the first failure is returned to the caller
//! - Response bodies are decoded only after the status check passes

pub mod client;
pub mod types;

pub use client::UpstreamClient;
pub use types::{AuthResponse, ListQuery, NewUser, UpstreamError, UpstreamResult};
