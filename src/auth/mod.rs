//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Protected request:
//!     → gate.rs (strategy chosen by auth.strategy)
//!         cookie: cookie.rs extracts session_id → SessionStore lookup
//!         bearer: Authorization token → upstream auth-refresh
//!     → Identity inserted into request extensions
//!     → handler
//! ```
//!
//! # Design Decisions
//! - One strategy per deployment, never mixed
//! - Fail closed: anything unresolvable is a 401 and the handler never runs

pub mod cookie;
pub mod gate;

pub use gate::{auth_gate, Identity};
