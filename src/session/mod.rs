//! Browser sessions.
//!
//! Sessions live only in process memory: they are created at login, removed
//! at logout or once their TTL has elapsed, and lost on restart.

pub mod store;
pub mod sweeper;

pub use store::{Session, SessionStore, SessionToken};
pub use sweeper::SessionSweeper;
