//! Typed views over record-store payloads.
//!
//! # Data Flow
//! ```text
//! upstream JSON body
//!     → page.rs (Page<Record>: shape checked once at decode)
//!     → Page::sanitized (bookkeeping fields stripped)   → client
//!     → rating.rs (RatingRecord: score coerced once)    → AggregateResult
//! ```

pub mod page;
pub mod rating;

pub use page::{Page, Record, INTERNAL_FIELDS};
pub use rating::{AggregateResult, RatingRecord, Score, ScoreError};
