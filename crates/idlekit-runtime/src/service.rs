//! Game service - the request/response surface
//!
//! One `GameService` per process, stateless between requests: every
//! operation loads the player from the persistence collaborator, runs the
//! ledger, and writes back, all under that player's lock. The upgrade
//! catalog is fetched once at construction and held as read-only reference
//! data.

use idlekit_core::{
    GameError, GameResult, GameTime, PlayerState, Upgrade, UpgradeCatalog, UpgradeId,
};
use idlekit_ledger::{PrestigeReceipt, ProgressionLedger};
use idlekit_store::PlayerStore;
use idlekit_time::Clock;

use crate::locks::PlayerLocks;

/// Leaderboard depth
pub const LEADERBOARD_SIZE: usize = 10;

/// Authoritative view of one player, returned after state-changing
/// operations so clients can rebaseline without a second round trip
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerSnapshot {
    pub username: String,
    pub cookies: f64,
    pub prestige_points: u32,
    pub prestige_multiplier: f64,
    pub effective_cps: f64,
    pub last_update: GameTime,
}

/// Response to a login/resume request
#[derive(Clone, Debug, PartialEq)]
pub struct LoginResponse {
    pub player: PlayerSnapshot,
    /// Currency credited for the absence
    pub offline_gain: f64,
    /// Whole seconds the player was away
    pub offline_seconds: u64,
}

/// One shop row: an upgrade plus whether the requester owns it
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradeListing {
    pub upgrade: Upgrade,
    pub owned: bool,
}

/// One leaderboard row
#[derive(Clone, Debug, PartialEq)]
pub struct LeaderboardEntry {
    pub username: String,
    pub cookies: f64,
}

/// The progression engine's service surface
pub struct GameService<S, C> {
    store: S,
    clock: C,
    ledger: ProgressionLedger,
    locks: PlayerLocks,
}

impl<S: PlayerStore, C: Clock> GameService<S, C> {
    /// Build a service over a store, loading the upgrade catalog once
    pub async fn connect(store: S, clock: C) -> GameResult<Self> {
        let upgrades = store.list_upgrades().await?;
        let ledger = ProgressionLedger::new(UpgradeCatalog::from_upgrades(upgrades));

        Ok(GameService {
            store,
            clock,
            ledger,
            locks: PlayerLocks::new(),
        })
    }

    /// The read-only upgrade catalog
    pub fn catalog(&self) -> &UpgradeCatalog {
        self.ledger.catalog()
    }

    /// Login or resume a session. Creates the player on first sight
    /// (idempotent), credits offline accrual exactly once, and advances the
    /// checkpoint. The returned snapshot is the client's new baseline; any
    /// locally-held prior value is discarded.
    pub async fn login(&self, username: &str) -> GameResult<LoginResponse> {
        let username = normalize_username(username)?;
        let _guard = self.locks.acquire(username).await;
        let now = self.clock.now();

        let mut state = match self.store.load_player(username).await? {
            Some(record) => {
                let owned = self.store.owned_upgrade_ids(username).await?;
                PlayerState::from_parts(record, owned)
            }
            None => PlayerState::new(username, now),
        };

        let credit = self.ledger.apply_offline_and_checkpoint(&mut state, now);
        self.store.upsert_player(&state.record).await?;

        tracing::debug!(
            username,
            gain = credit.gain,
            elapsed = credit.elapsed_seconds,
            "session resumed"
        );

        Ok(LoginResponse {
            player: self.snapshot(&state),
            offline_gain: credit.gain,
            offline_seconds: credit.elapsed_seconds,
        })
    }

    /// Periodic autosave of the client's locally-simulated total. Trusted
    /// verbatim; the offline path covers gaps between sessions, this covers
    /// gaps within one. Safe to retry.
    pub async fn save_checkpoint(&self, username: &str, cookies: f64) -> GameResult<()> {
        let username = normalize_username(username)?;
        if !cookies.is_finite() || cookies < 0.0 {
            tracing::warn!(username, value = cookies, "rejected checkpoint value");
            return Err(GameError::InvalidInput(format!(
                "checkpoint value must be a non-negative number, got {cookies}"
            )));
        }

        let _guard = self.locks.acquire(username).await;
        let mut state = self.load_state(username).await?;
        self.ledger.set_cookies(&mut state, cookies, self.clock.now())?;
        self.store.upsert_player(&state.record).await?;
        Ok(())
    }

    /// Shop listing: every upgrade in ascending cost order, flagged with
    /// the requester's ownership
    pub async fn list_upgrades(&self, username: &str) -> GameResult<Vec<UpgradeListing>> {
        let username = normalize_username(username)?;
        let owned = self.store.owned_upgrade_ids(username).await?;

        Ok(self
            .ledger
            .catalog()
            .iter()
            .map(|u| UpgradeListing {
                upgrade: u.clone(),
                owned: owned.contains(&u.id),
            })
            .collect())
    }

    /// Purchase an upgrade. Not idempotent; a repeat purchase fails with
    /// `AlreadyOwned`. Returns the post-purchase snapshot - the client must
    /// rebaseline from it rather than subtracting the cost locally.
    pub async fn purchase_upgrade(
        &self,
        username: &str,
        upgrade: UpgradeId,
    ) -> GameResult<PlayerSnapshot> {
        let username = normalize_username(username)?;
        let _guard = self.locks.acquire(username).await;

        let mut state = self.load_state(username).await?;
        self.ledger
            .purchase_upgrade(&mut state, upgrade, self.clock.now())?;

        self.store.upsert_player(&state.record).await?;
        self.store.insert_ownership(username, upgrade).await?;

        tracing::debug!(username, %upgrade, balance = state.record.cookies, "upgrade purchased");
        Ok(self.snapshot(&state))
    }

    /// Prestige reset: one-way trade of balance and upgrades for a
    /// permanent multiplier. Not idempotent.
    pub async fn prestige(&self, username: &str) -> GameResult<PrestigeReceipt> {
        let username = normalize_username(username)?;
        let _guard = self.locks.acquire(username).await;

        let mut state = self.load_state(username).await?;
        let receipt = self.ledger.prestige(&mut state, self.clock.now())?;

        self.store.clear_ownership(username).await?;
        self.store.upsert_player(&state.record).await?;

        tracing::debug!(
            username,
            gained = receipt.gained,
            total = receipt.prestige_points,
            "prestige reset"
        );
        Ok(receipt)
    }

    /// Top players by balance, descending, at most `LEADERBOARD_SIZE` rows
    pub async fn leaderboard(&self) -> GameResult<Vec<LeaderboardEntry>> {
        let top = self.store.top_players(LEADERBOARD_SIZE).await?;

        Ok(top
            .into_iter()
            .map(|p| LeaderboardEntry {
                username: p.username,
                cookies: p.cookies,
            })
            .collect())
    }

    async fn load_state(&self, username: &str) -> GameResult<PlayerState> {
        let record = self
            .store
            .load_player(username)
            .await?
            .ok_or_else(|| GameError::PlayerNotFound(username.to_string()))?;
        let owned = self.store.owned_upgrade_ids(username).await?;
        Ok(PlayerState::from_parts(record, owned))
    }

    fn snapshot(&self, state: &PlayerState) -> PlayerSnapshot {
        PlayerSnapshot {
            username: state.record.username.clone(),
            cookies: state.record.cookies,
            prestige_points: state.record.prestige_points,
            prestige_multiplier: state.record.prestige_multiplier(),
            effective_cps: self.ledger.effective_cps(state),
            last_update: state.record.last_update,
        }
    }
}

/// Trim surrounding whitespace and reject empty names
fn normalize_username(username: &str) -> GameResult<&str> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(GameError::InvalidInput("username must not be empty".into()));
    }
    Ok(trimmed)
}
