//! idlekit Bench - Fixtures for the criterion benchmark suite

use idlekit_core::{GameTime, PlayerState, Upgrade, UpgradeCatalog, UpgradeId};

/// Catalog of `n` upgrades with geometric costs and linear cps
pub fn synthetic_catalog(n: u64) -> UpgradeCatalog {
    UpgradeCatalog::from_upgrades(
        (1..=n)
            .map(|i| {
                Upgrade::new(
                    UpgradeId::new(i),
                    format!("upgrade-{i}"),
                    10.0 * 1.5f64.powi(i as i32),
                    0.5 * i as f64,
                )
            })
            .collect(),
    )
}

/// Player owning the first `owned` catalog entries
pub fn synthetic_player(catalog: &UpgradeCatalog, owned: usize, cookies: f64) -> PlayerState {
    let mut state = PlayerState::new("bench", GameTime::from_secs(1_000_000));
    state.record.cookies = cookies;
    state.owned = catalog.iter().take(owned).map(|u| u.id).collect();
    state
}
