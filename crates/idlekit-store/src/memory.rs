//! In-memory reference store
//!
//! HashMap-backed `PlayerStore` for tests, benchmarks and demos. A fault
//! toggle lets harnesses exercise the persistence-failure paths without a
//! real backend misbehaving on cue.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use parking_lot::RwLock;

use idlekit_core::{GameError, GameResult, PlayerRecord, Upgrade, UpgradeId};

use crate::PlayerStore;

#[derive(Default)]
struct Inner {
    players: HashMap<String, PlayerRecord>,
    ownership: HashMap<String, HashSet<UpgradeId>>,
    upgrades: Vec<Upgrade>,
}

/// In-process store; cheap to clone state out of, safe to share
#[derive(Default)]
pub struct MemoryStore {
    inner: RwLock<Inner>,
    faulty: AtomicBool,
}

impl MemoryStore {
    /// Empty store with no upgrade table
    pub fn new() -> Self {
        MemoryStore::default()
    }

    /// Store seeded with an upgrade table
    pub fn with_upgrades(upgrades: Vec<Upgrade>) -> Self {
        let store = MemoryStore::new();
        store.inner.write().upgrades = upgrades;
        store
    }

    /// When set, every call fails with `Persistence` until cleared
    pub fn set_faulty(&self, faulty: bool) {
        self.faulty.store(faulty, Ordering::SeqCst);
    }

    fn check_fault(&self) -> GameResult<()> {
        if self.faulty.load(Ordering::SeqCst) {
            return Err(GameError::Persistence("injected store fault".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl PlayerStore for MemoryStore {
    async fn load_player(&self, username: &str) -> GameResult<Option<PlayerRecord>> {
        self.check_fault()?;
        Ok(self.inner.read().players.get(username).cloned())
    }

    async fn upsert_player(&self, record: &PlayerRecord) -> GameResult<()> {
        self.check_fault()?;
        self.inner
            .write()
            .players
            .insert(record.username.clone(), record.clone());
        Ok(())
    }

    async fn list_upgrades(&self) -> GameResult<Vec<Upgrade>> {
        self.check_fault()?;
        Ok(self.inner.read().upgrades.clone())
    }

    async fn owned_upgrade_ids(&self, username: &str) -> GameResult<HashSet<UpgradeId>> {
        self.check_fault()?;
        Ok(self
            .inner
            .read()
            .ownership
            .get(username)
            .cloned()
            .unwrap_or_default())
    }

    async fn insert_ownership(&self, username: &str, upgrade: UpgradeId) -> GameResult<()> {
        self.check_fault()?;
        self.inner
            .write()
            .ownership
            .entry(username.to_string())
            .or_default()
            .insert(upgrade);
        Ok(())
    }

    async fn clear_ownership(&self, username: &str) -> GameResult<()> {
        self.check_fault()?;
        self.inner.write().ownership.remove(username);
        Ok(())
    }

    async fn top_players(&self, limit: usize) -> GameResult<Vec<PlayerRecord>> {
        self.check_fault()?;
        let mut players: Vec<PlayerRecord> =
            self.inner.read().players.values().cloned().collect();

        players.sort_by(|a, b| {
            b.cookies
                .partial_cmp(&a.cookies)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.username.cmp(&b.username))
        });
        players.truncate(limit);
        Ok(players)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use idlekit_core::GameTime;

    #[tokio::test]
    async fn test_memory_store_player_roundtrip() {
        let store = MemoryStore::new();
        let record = PlayerRecord::new("alice", GameTime::from_secs(100));

        assert!(store.load_player("alice").await.unwrap().is_none());
        store.upsert_player(&record).await.unwrap();
        assert_eq!(store.load_player("alice").await.unwrap(), Some(record));
    }

    #[tokio::test]
    async fn test_memory_store_usernames_case_sensitive() {
        let store = MemoryStore::new();
        store
            .upsert_player(&PlayerRecord::new("Alice", GameTime::ZERO))
            .await
            .unwrap();

        assert!(store.load_player("alice").await.unwrap().is_none());
        assert!(store.load_player("Alice").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_memory_store_ownership_lifecycle() {
        let store = MemoryStore::new();

        store
            .insert_ownership("alice", UpgradeId::new(1))
            .await
            .unwrap();
        store
            .insert_ownership("alice", UpgradeId::new(2))
            .await
            .unwrap();

        let owned = store.owned_upgrade_ids("alice").await.unwrap();
        assert_eq!(owned.len(), 2);

        store.clear_ownership("alice").await.unwrap();
        assert!(store.owned_upgrade_ids("alice").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_memory_store_top_players_order_and_limit() {
        let store = MemoryStore::new();
        for (name, cookies) in [("a", 10.0), ("b", 30.0), ("c", 20.0), ("d", 30.0)] {
            let mut record = PlayerRecord::new(name, GameTime::ZERO);
            record.cookies = cookies;
            store.upsert_player(&record).await.unwrap();
        }

        let top = store.top_players(3).await.unwrap();
        let names: Vec<&str> = top.iter().map(|p| p.username.as_str()).collect();

        // Descending by cookies, ties by username
        assert_eq!(names, vec!["b", "d", "c"]);
    }

    #[tokio::test]
    async fn test_memory_store_fault_injection() {
        let store = MemoryStore::new();

        store.set_faulty(true);
        let err = store.load_player("alice").await.unwrap_err();
        assert!(matches!(err, GameError::Persistence(_)));

        store.set_faulty(false);
        assert!(store.load_player("alice").await.unwrap().is_none());
    }
}
