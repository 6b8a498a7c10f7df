//! Client session cache
//!
//! The client simulates currency locally between server round trips: accrual
//! per second plus manual clicks. That local value is a cache of ledger
//! state, and caches need invalidation points. The rules:
//!
//! - A session only ever starts from an authoritative snapshot (login or a
//!   purchase response); any locally-held prior value is discarded.
//! - After a purchase or reconnect the cache is stale - the accrual rate may
//!   have changed and round-trip accrual would be lost or double-counted -
//!   so a stale session refuses further simulation until rebaselined.
//! - Autosave pushes are skipped while the value is unchanged since the
//!   last acknowledged push.

use idlekit_core::{GameError, GameResult};

use crate::PlayerSnapshot;

/// Cookies granted per manual click
pub const COOKIES_PER_CLICK: f64 = 1.0;

/// Locally-simulated player currency, valid between invalidation points
#[derive(Clone, Debug)]
pub struct ClientSession {
    username: String,
    cookies: f64,
    effective_cps: f64,
    /// Last value the ledger acknowledged
    last_pushed: f64,
    stale: bool,
}

impl ClientSession {
    /// Baseline a session from an authoritative snapshot
    pub fn resume(snapshot: &PlayerSnapshot) -> Self {
        ClientSession {
            username: snapshot.username.clone(),
            cookies: snapshot.cookies,
            effective_cps: snapshot.effective_cps,
            last_pushed: snapshot.cookies,
            stale: false,
        }
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    /// Locally-simulated balance
    pub fn cookies(&self) -> f64 {
        self.cookies
    }

    /// Accrual rate the simulation is running at
    pub fn effective_cps(&self) -> f64 {
        self.effective_cps
    }

    /// True once the cache has been invalidated and not yet rebaselined
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Simulate passive accrual for a slice of wall time
    pub fn tick(&mut self, seconds: f64) -> GameResult<()> {
        self.check_fresh()?;
        if seconds > 0.0 {
            self.cookies += self.effective_cps * seconds;
        }
        Ok(())
    }

    /// Register manual clicks
    pub fn record_clicks(&mut self, count: u32) -> GameResult<()> {
        self.check_fresh()?;
        self.cookies += count as f64 * COOKIES_PER_CLICK;
        Ok(())
    }

    /// Value to push on the autosave interval, or `None` when nothing
    /// changed since the last acknowledged push (or the cache is stale and
    /// must not overwrite authoritative state)
    pub fn checkpoint_value(&self) -> Option<f64> {
        if self.stale || self.cookies == self.last_pushed {
            None
        } else {
            Some(self.cookies)
        }
    }

    /// Record that the ledger accepted a pushed value. Only called after a
    /// successful save, so a failed push retries on the next interval.
    pub fn confirm_pushed(&mut self, value: f64) {
        self.last_pushed = value;
    }

    /// Invalidate the cache: the ledger moved underneath us (purchase,
    /// prestige, reconnect elsewhere)
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    /// Replace the cache wholesale from a fresh authoritative snapshot
    pub fn rebaseline(&mut self, snapshot: &PlayerSnapshot) {
        self.cookies = snapshot.cookies;
        self.effective_cps = snapshot.effective_cps;
        self.last_pushed = snapshot.cookies;
        self.stale = false;
    }

    fn check_fresh(&self) -> GameResult<()> {
        if self.stale {
            return Err(GameError::StaleSession);
        }
        Ok(())
    }
}
