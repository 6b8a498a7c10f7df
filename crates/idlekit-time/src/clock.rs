//! Clock implementations
//!
//! The engine never reads the system clock directly; every time-dependent
//! rule takes `now` from a `Clock`. That keeps the offline and checkpoint
//! math deterministic under test.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use idlekit_core::GameTime;

/// Source of "now" for the engine
pub trait Clock: Send + Sync {
    fn now(&self) -> GameTime;
}

/// Wall clock backed by `SystemTime`, UTC
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        SystemClock
    }
}

impl Clock for SystemClock {
    fn now(&self) -> GameTime {
        // A system clock before the epoch reads as the epoch itself rather
        // than panicking; downstream clamping handles the rest.
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| GameTime::from_micros(d.as_micros() as i64))
            .unwrap_or(GameTime::ZERO)
    }
}

/// Hand-driven clock for deterministic tests
#[derive(Clone, Debug, Default)]
pub struct ManualClock {
    micros: Arc<AtomicI64>,
}

impl ManualClock {
    /// Start the clock at a fixed instant
    pub fn starting_at(start: GameTime) -> Self {
        ManualClock {
            micros: Arc::new(AtomicI64::new(start.as_micros())),
        }
    }

    /// Jump to an absolute instant (may move backwards, for skew tests)
    pub fn set(&self, to: GameTime) {
        self.micros.store(to.as_micros(), Ordering::SeqCst);
    }

    /// Advance by a duration
    pub fn advance(&self, by: Duration) {
        self.micros
            .fetch_add(by.as_micros() as i64, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now(&self) -> GameTime {
        GameTime::from_micros(self.micros.load(Ordering::SeqCst))
    }
}
