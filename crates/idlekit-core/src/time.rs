//! Time primitives for the idlekit engine
//!
//! All checkpoints live on a single time axis: microseconds since the Unix
//! epoch, UTC, always. Stored timestamps carry no timezone qualifier because
//! there is only one convention anywhere in the engine.

use std::ops::{Add, Sub};
use std::time::Duration;

/// A point on the UTC time axis, microseconds since the Unix epoch
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct GameTime(pub i64);

impl GameTime {
    pub const ZERO: GameTime = GameTime(0);
    pub const MAX: GameTime = GameTime(i64::MAX);

    #[inline]
    pub fn from_micros(micros: i64) -> Self {
        GameTime(micros)
    }

    #[inline]
    pub fn from_millis(millis: i64) -> Self {
        GameTime(millis * 1000)
    }

    #[inline]
    pub fn from_secs(secs: i64) -> Self {
        GameTime(secs * 1_000_000)
    }

    #[inline]
    pub fn as_micros(self) -> i64 {
        self.0
    }

    #[inline]
    pub fn as_secs_f64(self) -> f64 {
        self.0 as f64 / 1_000_000.0
    }

    /// Whole seconds elapsed since `earlier`, floored.
    /// Clamped to zero when `earlier` is in the future (skewed clocks,
    /// corrupted checkpoints) - elapsed time is never negative.
    #[inline]
    pub fn whole_seconds_since(self, earlier: GameTime) -> u64 {
        let diff = self.0.saturating_sub(earlier.0);
        if diff <= 0 {
            0
        } else {
            (diff / 1_000_000) as u64
        }
    }

    #[inline]
    pub fn saturating_add(self, duration: Duration) -> Self {
        GameTime(self.0.saturating_add(duration.as_micros() as i64))
    }
}

impl Add<Duration> for GameTime {
    type Output = GameTime;

    #[inline]
    fn add(self, rhs: Duration) -> Self::Output {
        GameTime(self.0 + rhs.as_micros() as i64)
    }
}

impl Sub<GameTime> for GameTime {
    type Output = Duration;

    #[inline]
    fn sub(self, rhs: GameTime) -> Self::Output {
        let diff = self.0 - rhs.0;
        if diff >= 0 {
            Duration::from_micros(diff as u64)
        } else {
            Duration::ZERO
        }
    }
}

impl std::fmt::Debug for GameTime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "t({:.3}s)", self.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_whole_seconds_floors() {
        let earlier = GameTime::from_secs(100);
        let later = GameTime::from_micros(101_999_999);

        // 1.999999s elapsed floors to 1
        assert_eq!(later.whole_seconds_since(earlier), 1);
    }

    #[test]
    fn test_whole_seconds_clamps_backwards_clock() {
        let earlier = GameTime::from_secs(200);
        let later = GameTime::from_secs(100);

        assert_eq!(later.whole_seconds_since(earlier), 0);
    }

    #[test]
    fn test_whole_seconds_zero_elapsed() {
        let t = GameTime::from_secs(50);
        assert_eq!(t.whole_seconds_since(t), 0);
    }

    #[test]
    fn test_ord_max_for_checkpoint_advance() {
        // Checkpoints advance with `Ord::max` so last_update never moves
        // backwards under a skewed clock.
        let checkpoint = GameTime::from_secs(100);
        let skewed = GameTime::from_secs(90);

        assert_eq!(checkpoint.max(skewed), checkpoint);
        assert_eq!(skewed.max(checkpoint), checkpoint);
    }

    #[test]
    fn test_sub_saturates_at_zero() {
        let a = GameTime::from_secs(1);
        let b = GameTime::from_secs(2);

        assert_eq!(a - b, Duration::ZERO);
        assert_eq!(b - a, Duration::from_secs(1));
    }
}
