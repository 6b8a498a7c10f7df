//! Persistence collaborator contract

use std::collections::HashSet;

use async_trait::async_trait;

use idlekit_core::{GameResult, PlayerRecord, Upgrade, UpgradeId};

/// Durable storage for players, ownership rows and the upgrade table.
///
/// Everything is keyed by username. Any method may fail with
/// `GameError::Persistence`; the engine surfaces that unchanged and never
/// retries - one logical game operation maps to one pass over the store.
#[async_trait]
pub trait PlayerStore: Send + Sync {
    /// Load a player row, `None` if the username has never logged in
    async fn load_player(&self, username: &str) -> GameResult<Option<PlayerRecord>>;

    /// Insert or overwrite a player row
    async fn upsert_player(&self, record: &PlayerRecord) -> GameResult<()>;

    /// The full upgrade table, any order
    async fn list_upgrades(&self) -> GameResult<Vec<Upgrade>>;

    /// Ids of upgrades owned by a player
    async fn owned_upgrade_ids(&self, username: &str) -> GameResult<HashSet<UpgradeId>>;

    /// Record one (player, upgrade) ownership pair
    async fn insert_ownership(&self, username: &str, upgrade: UpgradeId) -> GameResult<()>;

    /// Remove every ownership row for a player (prestige reset)
    async fn clear_ownership(&self, username: &str) -> GameResult<()>;

    /// Top players by balance, descending; ties break on ascending
    /// username so the order is stable across calls
    async fn top_players(&self, limit: usize) -> GameResult<Vec<PlayerRecord>>;
}

/// Shared handles delegate, so one store can back a service and still be
/// reachable from a harness
#[async_trait]
impl<T: PlayerStore + ?Sized> PlayerStore for std::sync::Arc<T> {
    async fn load_player(&self, username: &str) -> GameResult<Option<PlayerRecord>> {
        (**self).load_player(username).await
    }

    async fn upsert_player(&self, record: &PlayerRecord) -> GameResult<()> {
        (**self).upsert_player(record).await
    }

    async fn list_upgrades(&self) -> GameResult<Vec<Upgrade>> {
        (**self).list_upgrades().await
    }

    async fn owned_upgrade_ids(&self, username: &str) -> GameResult<HashSet<UpgradeId>> {
        (**self).owned_upgrade_ids(username).await
    }

    async fn insert_ownership(&self, username: &str, upgrade: UpgradeId) -> GameResult<()> {
        (**self).insert_ownership(username, upgrade).await
    }

    async fn clear_ownership(&self, username: &str) -> GameResult<()> {
        (**self).clear_ownership(username).await
    }

    async fn top_players(&self, limit: usize) -> GameResult<Vec<PlayerRecord>> {
        (**self).top_players(limit).await
    }
}
