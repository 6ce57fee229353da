//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware stack)
//!     → request.rs (request ID span)
//!     → auth gate (protected routes only)
//!     → handlers
//!     → error.rs (ApiError → status + generic message)
//!     → Send to client
//! ```

pub mod error;
pub mod request;
pub mod server;

pub use error::ApiError;
pub use request::X_REQUEST_ID;
pub use server::{AppState, HttpServer};
