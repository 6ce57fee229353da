//! Periodic removal of expired sessions.
//!
//! Lookups already reject expired sessions; the sweeper bounds memory for
//! sessions that are never presented again.

use std::time::Duration;

use tokio::sync::broadcast;
use tokio::time;

use crate::session::store::SessionStore;

pub struct SessionSweeper {
    store: SessionStore,
    interval: Duration,
}

impl SessionSweeper {
    pub fn new(store: SessionStore, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Sweep every `interval` until shutdown is signalled.
    pub async fn run(self, mut shutdown: broadcast::Receiver<()>) {
        tracing::info!(
            interval_secs = self.interval.as_secs(),
            ttl_secs = self.store.ttl().as_secs(),
            "Session sweeper starting"
        );

        let mut ticker = time::interval(self.interval);
        // The first tick completes immediately.
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = self.store.purge_expired();
                    if removed > 0 {
                        tracing::info!(removed, remaining = self.store.len(), "Expired sessions purged");
                    }
                }
                _ = shutdown.recv() => {
                    tracing::info!("Session sweeper received shutdown signal, exiting loop");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sweeper_purges_and_stops() {
        let store = SessionStore::new(Duration::from_millis(10));
        store.create("alice");

        let (tx, rx) = broadcast::channel(1);
        let sweeper = SessionSweeper::new(store.clone(), Duration::from_millis(25));
        let handle = tokio::spawn(sweeper.run(rx));

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert!(store.is_empty());

        tx.send(()).unwrap();
        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("sweeper did not stop")
            .unwrap();
    }
}
