//! Seeded random soak
//!
//! Hammers one player with the full operation mix - play, autosave,
//! purchase, reconnect with an offline gap, prestige - while checking the
//! engine invariants after every step:
//!
//! - the authoritative balance never goes negative
//! - a reconnect credits exactly the time since the last checkpoint, once
//! - after an acknowledged autosave, client and ledger agree exactly
//!
//! Deterministic per seed, so a failure reproduces.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use idlekit_core::{GameError, GameResult, GameTime, Upgrade, UpgradeId};
use idlekit_runtime::GameService;
use idlekit_store::{MemoryStore, PlayerStore};
use idlekit_time::{Clock, ManualClock};

use crate::SimulatedClient;

/// Soak parameters
#[derive(Clone, Copy, Debug)]
pub struct SoakConfig {
    pub steps: u32,
    pub seed: u64,
}

impl Default for SoakConfig {
    fn default() -> Self {
        SoakConfig {
            steps: 500,
            seed: 0x1D1E,
        }
    }
}

/// What the soak did and where it ended up
#[derive(Clone, Copy, Debug, Default)]
pub struct SoakReport {
    pub plays: u32,
    pub autosaves: u32,
    pub purchases: u32,
    pub rejected_purchases: u32,
    pub reconnects: u32,
    pub prestiges: u32,
    pub rejected_prestiges: u32,
    pub final_cookies: f64,
}

fn soak_upgrades() -> Vec<Upgrade> {
    vec![
        Upgrade::new(UpgradeId::new(1), "Cursor", 15.0, 0.5),
        Upgrade::new(UpgradeId::new(2), "Grandma", 100.0, 2.0),
        Upgrade::new(UpgradeId::new(3), "Farm", 500.0, 6.0),
        Upgrade::new(UpgradeId::new(4), "Mine", 2_000.0, 15.0),
        Upgrade::new(UpgradeId::new(5), "Factory", 10_000.0, 40.0),
    ]
}

/// Run the soak; any invariant breach comes back as `InvalidState`
pub async fn run_soak(config: SoakConfig) -> GameResult<SoakReport> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    let clock = ManualClock::starting_at(GameTime::from_secs(1_000_000_000));
    let store = Arc::new(MemoryStore::with_upgrades(soak_upgrades()));
    let service = GameService::connect(Arc::clone(&store), clock.clone()).await?;

    let mut client = SimulatedClient::new("soak");
    let mut report = SoakReport::default();
    client.login(&service).await?;

    for step in 0..config.steps {
        match rng.gen_range(0..100u32) {
            // Play: local simulation while the wall clock runs
            0..=49 => {
                let seconds = rng.gen_range(1..=30u64);
                let clicks = rng.gen_range(0..=20u32);
                client.play(seconds as f64, clicks)?;
                clock.advance(Duration::from_secs(seconds));
                report.plays += 1;
            }
            // Autosave, then a back-to-back consistency probe
            50..=64 => {
                if client.autosave(&service).await? {
                    report.autosaves += 1;
                    let stored = authoritative(&store).await?;
                    check(
                        stored.cookies == client.cookies(),
                        step,
                        "client and ledger diverged after acknowledged autosave",
                    )?;
                }
            }
            // Purchase some catalog entry; rejection reasons are typed
            65..=79 => {
                let id = UpgradeId::new(rng.gen_range(1..=5u64));
                match client.buy(&service, id).await {
                    Ok(()) => report.purchases += 1,
                    Err(
                        GameError::InsufficientFunds { .. } | GameError::AlreadyOwned(_),
                    ) => report.rejected_purchases += 1,
                    Err(other) => return Err(other),
                }
            }
            // Reconnect after an offline gap. Unsaved play time counts
            // into the elapsed window too: elapsed runs from the last
            // authoritative checkpoint, not from the last local tick.
            80..=89 => {
                let before = authoritative(&store).await?;
                let gap = rng.gen_range(0..=600u64);
                clock.advance(Duration::from_secs(gap));

                let expected = clock.now().whole_seconds_since(before.last_update);
                let response = client.login(&service).await?;
                check(
                    response.offline_seconds == expected,
                    step,
                    "offline credit did not match the checkpoint gap",
                )?;
                report.reconnects += 1;
            }
            // Prestige attempt
            _ => match client.prestige(&service).await {
                Ok(_) => report.prestiges += 1,
                Err(GameError::InsufficientFunds { .. }) => report.rejected_prestiges += 1,
                Err(other) => return Err(other),
            },
        }

        let stored = authoritative(&store).await?;
        check(
            stored.cookies >= 0.0,
            step,
            "authoritative balance went negative",
        )?;
        check(client.cookies() >= 0.0, step, "local balance went negative")?;
    }

    report.final_cookies = client.cookies();
    Ok(report)
}

async fn authoritative(store: &MemoryStore) -> GameResult<idlekit_core::PlayerRecord> {
    store
        .load_player("soak")
        .await?
        .ok_or_else(|| GameError::InvalidState("soak player missing from store".into()))
}

fn check(ok: bool, step: u32, what: &str) -> GameResult<()> {
    if ok {
        Ok(())
    } else {
        Err(GameError::InvalidState(format!("step {step}: {what}")))
    }
}
