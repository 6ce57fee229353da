//! In-memory session store.

use std::fmt;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use uuid::Uuid;

use crate::observability::metrics;

/// Opaque session token handed to the browser in the `session_id` cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionToken(String);

impl SessionToken {
    fn generate() -> Self {
        Self(format!("sess-{}", Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SessionToken {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// A logged-in browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Username the session was created for.
    pub identity: String,
    /// When the session was created.
    pub issued_at: SystemTime,
}

impl Session {
    /// Check whether the session has outlived `ttl`.
    ///
    /// A clock that moved backwards never expires a session early.
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.issued_at
            .elapsed()
            .map(|age| age >= ttl)
            .unwrap_or(false)
    }
}

/// A thread-safe token → session map.
///
/// Clones share the same underlying map.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<DashMap<String, Session>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create an empty store whose sessions live for `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Start a session for `identity` and return its token.
    pub fn create(&self, identity: impl Into<String>) -> SessionToken {
        let session = Session {
            identity: identity.into(),
            issued_at: SystemTime::now(),
        };
        let token = loop {
            let token = SessionToken::generate();
            // Never overwrite an existing session.
            if let Entry::Vacant(slot) = self.inner.entry(token.0.clone()) {
                slot.insert(session);
                break token;
            }
        };
        metrics::record_sessions(self.inner.len());
        token
    }

    /// Resolve a token. Expired sessions are removed and reported absent.
    pub fn lookup(&self, token: &str) -> Option<Session> {
        {
            let entry = self.inner.get(token)?;
            if !entry.is_expired(self.ttl) {
                return Some(entry.value().clone());
            }
        }
        let ttl = self.ttl;
        if self.inner.remove_if(token, |_, s| s.is_expired(ttl)).is_some() {
            tracing::debug!("Expired session removed on lookup");
            metrics::record_sessions(self.inner.len());
        }
        None
    }

    /// End a session. Returns whether it existed.
    pub fn delete(&self, token: &str) -> bool {
        let removed = self.inner.remove(token).is_some();
        if removed {
            metrics::record_sessions(self.inner.len());
        }
        removed
    }

    /// Drop every expired session, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let before = self.inner.len();
        let ttl = self.ttl;
        self.inner.retain(|_, s| !s.is_expired(ttl));
        let after = self.inner.len();
        metrics::record_sessions(after);
        before.saturating_sub(after)
    }

    /// Number of sessions currently held, expired or not.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}
