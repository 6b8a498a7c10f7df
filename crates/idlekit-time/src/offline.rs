//! Offline progress resolution
//!
//! Credits a returning player for real time spent away:
//! `elapsed = max(0, floor(now - last_update))` whole seconds,
//! `gain = effective_cps * elapsed`. Runs exactly once per session resume;
//! the caller advances the checkpoint immediately afterwards so the same
//! interval is never credited twice.

use idlekit_core::GameTime;

/// Outcome of one offline resolution
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct OfflineReport {
    /// Whole seconds between checkpoint and now, clamped at zero
    pub elapsed_seconds: u64,
    /// Currency credited for the absence
    pub gain: f64,
}

impl OfflineReport {
    /// Report for no elapsed time or no accrual
    pub const NONE: OfflineReport = OfflineReport {
        elapsed_seconds: 0,
        gain: 0.0,
    };
}

/// Compute the credit for time elapsed between `last_update` and `now`.
///
/// `now < last_update` (skewed clock, corrupted checkpoint) clamps to zero
/// elapsed - the gain is never negative. A zero accrual rate yields zero
/// gain regardless of elapsed time.
pub fn resolve_offline(last_update: GameTime, now: GameTime, effective_cps: f64) -> OfflineReport {
    let elapsed_seconds = now.whole_seconds_since(last_update);
    if elapsed_seconds == 0 || effective_cps <= 0.0 {
        return OfflineReport {
            elapsed_seconds,
            gain: 0.0,
        };
    }

    OfflineReport {
        elapsed_seconds,
        gain: effective_cps * elapsed_seconds as f64,
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_offline_gain_never_negative(
            last in -1_000_000_000i64..2_000_000_000,
            now in -1_000_000_000i64..2_000_000_000,
            cps in 0.0f64..10_000.0,
        ) {
            let report = resolve_offline(
                GameTime::from_secs(last),
                GameTime::from_secs(now),
                cps,
            );
            prop_assert!(report.gain >= 0.0);
        }

        #[test]
        fn prop_offline_gain_scales_with_cps(
            elapsed in 1i64..1_000_000,
            cps in 0.001f64..1_000.0,
        ) {
            let last = GameTime::from_secs(1_000);
            let now = GameTime::from_secs(1_000 + elapsed);

            let report = resolve_offline(last, now, cps);
            prop_assert_eq!(report.elapsed_seconds, elapsed as u64);
            prop_assert!((report.gain - cps * elapsed as f64).abs() < 1e-6);
        }
    }
}
