//! Per-player mutual exclusion
//!
//! Login, checkpoint save, purchase and prestige all read-then-write the
//! same player row; interleaving them loses updates or double-credits
//! offline gain. Each player gets one async mutex, created on first use.
//! The registry mutex only guards lookup/insert and is never held across
//! an await point.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

/// Registry of per-player locks
#[derive(Default)]
pub struct PlayerLocks {
    registry: Mutex<HashMap<String, Arc<AsyncMutex<()>>>>,
}

impl PlayerLocks {
    pub fn new() -> Self {
        PlayerLocks::default()
    }

    /// Take the lock for one player, waiting behind any operation already
    /// in flight for the same username
    pub async fn acquire(&self, username: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut registry = self.registry.lock();
            Arc::clone(registry.entry(username.to_string()).or_default())
        };
        lock.lock_owned().await
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use tokio::time::timeout;

    use super::*;

    #[tokio::test]
    async fn test_same_player_serializes() {
        let locks = PlayerLocks::new();

        let guard = locks.acquire("alice").await;
        // Second acquire for the same player must wait
        assert!(timeout(Duration::from_millis(20), locks.acquire("alice"))
            .await
            .is_err());

        drop(guard);
        timeout(Duration::from_millis(20), locks.acquire("alice"))
            .await
            .expect("lock should be free after release");
    }

    #[tokio::test]
    async fn test_different_players_independent() {
        let locks = PlayerLocks::new();

        let _alice = locks.acquire("alice").await;
        // Completes despite alice's lock being held
        timeout(Duration::from_millis(20), locks.acquire("bob"))
            .await
            .expect("cross-player locks are independent");
    }
}
