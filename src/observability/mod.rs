//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events via tracing)
//!     → metrics.rs (request, upstream and session series)
//!
//! Consumers:
//!     → stdout (compact or JSON lines)
//!     → Prometheus exporter on observability.metrics_address
//! ```
//!
//! # Design Decisions
//! - Request ID flows through the HTTP trace span
//! - Failures are logged where they are detected, with collection and
//!   recipe context; clients only see generic messages

pub mod logging;
pub mod metrics;
