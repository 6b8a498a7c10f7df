//! Accrual calculation
//!
//! Pure functions from owned upgrades and prestige level to a
//! cookies-per-second rate. No rounding happens here; consumers present
//! the number however they like.

use std::collections::HashSet;

use idlekit_core::{PlayerState, UpgradeCatalog, UpgradeId, PRESTIGE_STEP};

/// Sum of cps contributions over the owned set.
/// Owned ids missing from the catalog are ignored, not an error - stale
/// ownership rows must not poison the rate.
pub fn base_cps(catalog: &UpgradeCatalog, owned: &HashSet<UpgradeId>) -> f64 {
    owned
        .iter()
        .filter_map(|&id| catalog.get(id))
        .map(|u| u.cps)
        .sum()
}

/// `base_cps * (1 + prestige_points * 0.1)`.
/// A player with no owned upgrades accrues nothing regardless of prestige;
/// the multiplier only scales a nonzero base.
pub fn effective_cps(catalog: &UpgradeCatalog, owned: &HashSet<UpgradeId>, prestige_points: u32) -> f64 {
    let base = base_cps(catalog, owned);
    if base == 0.0 {
        return 0.0;
    }
    base * (1.0 + prestige_points as f64 * PRESTIGE_STEP)
}

/// Convenience form over a full player state
pub fn effective_cps_for(catalog: &UpgradeCatalog, state: &PlayerState) -> f64 {
    effective_cps(catalog, &state.owned, state.record.prestige_points)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use idlekit_core::Upgrade;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn prop_effective_cps_never_negative(
            cps_values in proptest::collection::vec(0.0f64..100.0, 0..8),
            prestige in 0u32..1_000,
        ) {
            let upgrades: Vec<Upgrade> = cps_values
                .iter()
                .enumerate()
                .map(|(i, &cps)| Upgrade::new(UpgradeId::new(i as u64), "u", 1.0 + i as f64, cps))
                .collect();
            let owned: HashSet<UpgradeId> =
                upgrades.iter().map(|u| u.id).collect();
            let catalog = UpgradeCatalog::from_upgrades(upgrades);

            prop_assert!(effective_cps(&catalog, &owned, prestige) >= 0.0);
        }

        #[test]
        fn prop_prestige_never_shrinks_rate(
            base in 0.1f64..1_000.0,
            prestige in 0u32..1_000,
        ) {
            let catalog = UpgradeCatalog::from_upgrades(vec![Upgrade::new(
                UpgradeId::new(1),
                "u",
                10.0,
                base,
            )]);
            let owned: HashSet<UpgradeId> = [UpgradeId::new(1)].into();

            let unscaled = effective_cps(&catalog, &owned, 0);
            let scaled = effective_cps(&catalog, &owned, prestige);
            prop_assert!(scaled >= unscaled);
        }
    }
}
