//! Player records and progression state
//!
//! A `PlayerRecord` mirrors the durable row held by the persistence
//! collaborator. `PlayerState` is the in-memory working set one ledger
//! operation acts on: the record plus the owned-upgrade set.
//!
//! Invariants:
//! - `cookies >= 0` after every operation
//! - `last_update` never decreases

use std::collections::HashSet;

use crate::{GameTime, UpgradeId};

/// Currency required per prestige point
pub const PRESTIGE_DIVISOR: f64 = 1000.0;

/// Multiplier gained per prestige point
pub const PRESTIGE_STEP: f64 = 0.1;

/// Durable per-player row: balance, prestige, last checkpoint
#[derive(Clone, Debug, PartialEq)]
pub struct PlayerRecord {
    /// Unique username, case-sensitive, non-empty
    pub username: String,
    /// Currency balance, non-negative
    pub cookies: f64,
    /// Lifetime prestige points
    pub prestige_points: u32,
    /// Last authoritative checkpoint
    pub last_update: GameTime,
}

impl PlayerRecord {
    /// Fresh record for a first login: zero balances, checkpoint at `now`
    pub fn new(username: impl Into<String>, now: GameTime) -> Self {
        PlayerRecord {
            username: username.into(),
            cookies: 0.0,
            prestige_points: 0,
            last_update: now,
        }
    }

    /// `1 + prestige_points * 0.1`
    #[inline]
    pub fn prestige_multiplier(&self) -> f64 {
        1.0 + self.prestige_points as f64 * PRESTIGE_STEP
    }
}

/// Working set for one ledger operation: record plus owned upgrades
#[derive(Clone, Debug)]
pub struct PlayerState {
    pub record: PlayerRecord,
    pub owned: HashSet<UpgradeId>,
}

impl PlayerState {
    /// State for a brand-new player
    pub fn new(username: impl Into<String>, now: GameTime) -> Self {
        PlayerState {
            record: PlayerRecord::new(username, now),
            owned: HashSet::new(),
        }
    }

    /// Rehydrate from a stored record and its ownership rows
    pub fn from_parts(record: PlayerRecord, owned: HashSet<UpgradeId>) -> Self {
        PlayerState { record, owned }
    }

    #[inline]
    pub fn owns(&self, id: UpgradeId) -> bool {
        self.owned.contains(&id)
    }

    /// Advance the checkpoint, never backwards
    #[inline]
    pub fn touch(&mut self, now: GameTime) {
        self.record.last_update = self.record.last_update.max(now);
    }
}
