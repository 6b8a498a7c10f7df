//! Progression ledger - the authoritative per-player state machine
//!
//! Every operation is a read-check-mutate over one `PlayerState`: checks
//! run before any field changes, so a rejected operation leaves the state
//! exactly as it found it. The ledger holds the upgrade catalog and nothing
//! else; it never touches storage or clocks.

use idlekit_core::{
    GameError, GameResult, GameTime, PlayerState, UpgradeCatalog, UpgradeId, PRESTIGE_DIVISOR,
};
use idlekit_time::{resolve_offline, OfflineReport};

use crate::accrual::effective_cps_for;

/// Outcome of applying offline credit at session resume
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OfflineCredit {
    /// Balance after the credit
    pub cookies: f64,
    /// Currency credited for the absence
    pub gain: f64,
    /// Whole seconds the player was away
    pub elapsed_seconds: u64,
}

/// Outcome of a prestige reset
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PrestigeReceipt {
    /// Points gained by this reset
    pub gained: u32,
    /// Lifetime total after the reset
    pub prestige_points: u32,
    /// New accrual multiplier
    pub multiplier: f64,
}

/// The authoritative progression state machine
pub struct ProgressionLedger {
    catalog: UpgradeCatalog,
}

impl ProgressionLedger {
    pub fn new(catalog: UpgradeCatalog) -> Self {
        ProgressionLedger { catalog }
    }

    /// The read-only upgrade catalog
    pub fn catalog(&self) -> &UpgradeCatalog {
        &self.catalog
    }

    /// Current passive accrual rate for a player
    pub fn effective_cps(&self, state: &PlayerState) -> f64 {
        effective_cps_for(&self.catalog, state)
    }

    /// Credit offline accrual and advance the checkpoint to `now`.
    /// Runs once per session resume; advancing `last_update` in the same
    /// step is what keeps the interval from being credited twice.
    pub fn apply_offline_and_checkpoint(
        &self,
        state: &mut PlayerState,
        now: GameTime,
    ) -> OfflineCredit {
        let rate = self.effective_cps(state);
        let OfflineReport {
            elapsed_seconds,
            gain,
        } = resolve_offline(state.record.last_update, now, rate);

        state.record.cookies += gain;
        state.touch(now);

        OfflineCredit {
            cookies: state.record.cookies,
            gain,
            elapsed_seconds,
        }
    }

    /// Authoritative overwrite from a periodic client autosave.
    /// Trusts the client's locally-accumulated total verbatim; the offline
    /// path covers gaps between sessions, this covers gaps within one.
    pub fn set_cookies(&self, state: &mut PlayerState, value: f64, now: GameTime) -> GameResult<()> {
        if !value.is_finite() || value < 0.0 {
            return Err(GameError::InvalidState(format!(
                "checkpoint value must be finite and non-negative, got {value}"
            )));
        }

        state.record.cookies = value;
        state.touch(now);
        Ok(())
    }

    /// Purchase an upgrade: deduct its cost and record ownership.
    /// Not idempotent - a repeat purchase is rejected with `AlreadyOwned`
    /// before the funds check, so the rejection reason is stable whatever
    /// the balance.
    pub fn purchase_upgrade(
        &self,
        state: &mut PlayerState,
        id: UpgradeId,
        now: GameTime,
    ) -> GameResult<()> {
        let upgrade = self
            .catalog
            .get(id)
            .ok_or(GameError::UpgradeNotFound(id))?;

        if state.owns(id) {
            return Err(GameError::AlreadyOwned(id));
        }
        if state.record.cookies < upgrade.cost {
            return Err(GameError::InsufficientFunds {
                have: state.record.cookies,
                need: upgrade.cost,
            });
        }

        state.record.cookies -= upgrade.cost;
        state.owned.insert(id);
        state.touch(now);
        Ok(())
    }

    /// Prestige: one-way reset of balance and ownership for permanent
    /// multiplier growth. `gain = floor(cookies / 1000)`; below the divisor
    /// the reset is rejected and nothing changes.
    pub fn prestige(&self, state: &mut PlayerState, now: GameTime) -> GameResult<PrestigeReceipt> {
        let gained = (state.record.cookies / PRESTIGE_DIVISOR).floor() as u32;
        if gained < 1 {
            return Err(GameError::InsufficientFunds {
                have: state.record.cookies,
                need: PRESTIGE_DIVISOR,
            });
        }

        state.record.cookies = 0.0;
        state.record.prestige_points += gained;
        state.owned.clear();
        state.touch(now);

        Ok(PrestigeReceipt {
            gained,
            prestige_points: state.record.prestige_points,
            multiplier: state.record.prestige_multiplier(),
        })
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use idlekit_core::Upgrade;
    use proptest::prelude::*;

    fn ledger() -> ProgressionLedger {
        ProgressionLedger::new(UpgradeCatalog::from_upgrades(vec![
            Upgrade::new(UpgradeId::new(1), "Cursor", 50.0, 1.0),
            Upgrade::new(UpgradeId::new(2), "Grandma", 100.0, 5.0),
        ]))
    }

    proptest! {
        #[test]
        fn prop_cookies_never_negative_after_purchase(
            cookies in 0.0f64..10_000.0,
            id in 1u64..4,
        ) {
            let ledger = ledger();
            let mut state = PlayerState::new("p", GameTime::ZERO);
            state.record.cookies = cookies;

            let _ = ledger.purchase_upgrade(
                &mut state,
                UpgradeId::new(id),
                GameTime::from_secs(1),
            );
            prop_assert!(state.record.cookies >= 0.0);
        }

        #[test]
        fn prop_prestige_outcome_consistent(cookies in 0.0f64..1_000_000.0) {
            let ledger = ledger();
            let mut state = PlayerState::new("p", GameTime::ZERO);
            state.record.cookies = cookies;

            match ledger.prestige(&mut state, GameTime::from_secs(1)) {
                Ok(receipt) => {
                    prop_assert_eq!(receipt.gained, (cookies / 1000.0).floor() as u32);
                    prop_assert_eq!(state.record.cookies, 0.0);
                }
                Err(_) => {
                    prop_assert!(cookies < 1000.0);
                    prop_assert_eq!(state.record.cookies, cookies);
                }
            }
        }

        #[test]
        fn prop_checkpoint_never_rewinds(
            start in 0i64..1_000_000,
            later in proptest::collection::vec(0i64..1_000_000, 1..8),
        ) {
            let ledger = ledger();
            let mut state = PlayerState::new("p", GameTime::from_secs(start));

            for t in later {
                let before = state.record.last_update;
                ledger.apply_offline_and_checkpoint(&mut state, GameTime::from_secs(t));
                prop_assert!(state.record.last_update >= before);
            }
        }
    }
}
