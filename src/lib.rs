//! Recipe gateway library.
//!
//! Session-authenticated proxy in front of a record-store: sanitized
//! `recipes`/`ratings` reads and per-recipe average ratings.

pub mod aggregate;
pub mod auth;
pub mod config;
pub mod handlers;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod records;
pub mod session;
pub mod upstream;

pub use config::{validate_config, ConfigError, GatewayConfig};
pub use http::{ApiError, AppState, HttpServer};
pub use lifecycle::Shutdown;
pub use session::SessionStore;
pub use upstream::UpstreamClient;
