//! Simulated presentation client
//!
//! A well-behaved client for driving the real service in tests: it follows
//! the reconciliation protocol to the letter - baselines from login,
//! rebaselines from purchase responses, pushes autosaves only when the
//! local value moved.

use idlekit_core::{GameError, GameResult, UpgradeId};
use idlekit_runtime::{ClientSession, GameService, LoginResponse};
use idlekit_store::PlayerStore;
use idlekit_time::Clock;

/// Scripted client over one username
pub struct SimulatedClient {
    username: String,
    session: Option<ClientSession>,
}

impl SimulatedClient {
    pub fn new(username: impl Into<String>) -> Self {
        SimulatedClient {
            username: username.into(),
            session: None,
        }
    }

    /// The live session, if logged in
    pub fn session(&self) -> Option<&ClientSession> {
        self.session.as_ref()
    }

    /// Locally-simulated balance; zero before first login
    pub fn cookies(&self) -> f64 {
        self.session.as_ref().map(ClientSession::cookies).unwrap_or(0.0)
    }

    /// Login/resume: whatever was held locally is discarded for the
    /// authoritative baseline
    pub async fn login<S: PlayerStore, C: Clock>(
        &mut self,
        service: &GameService<S, C>,
    ) -> GameResult<LoginResponse> {
        let response = service.login(&self.username).await?;
        self.session = Some(ClientSession::resume(&response.player));
        Ok(response)
    }

    /// Simulate `seconds` of play with `clicks` manual clicks spread in
    pub fn play(&mut self, seconds: f64, clicks: u32) -> GameResult<()> {
        let session = self.session_mut()?;
        session.tick(seconds)?;
        session.record_clicks(clicks)
    }

    /// Push the autosave if the value moved; returns whether a push happened
    pub async fn autosave<S: PlayerStore, C: Clock>(
        &mut self,
        service: &GameService<S, C>,
    ) -> GameResult<bool> {
        let session = self.session_mut()?;
        let Some(value) = session.checkpoint_value() else {
            return Ok(false);
        };

        service.save_checkpoint(session.username(), value).await?;
        session.confirm_pushed(value);
        Ok(true)
    }

    /// Purchase an upgrade and rebaseline from the authoritative response
    pub async fn buy<S: PlayerStore, C: Clock>(
        &mut self,
        service: &GameService<S, C>,
        upgrade: UpgradeId,
    ) -> GameResult<()> {
        // Push local accrual first so the ledger charges the real balance
        self.autosave(service).await?;
        self.session_mut()?.invalidate();

        match service.purchase_upgrade(&self.username, upgrade).await {
            Ok(snapshot) => {
                self.session_mut()?.rebaseline(&snapshot);
                Ok(())
            }
            Err(err) => {
                // Rejected purchases change nothing server-side; recover the
                // session with a fresh login
                let response = service.login(&self.username).await?;
                self.session = Some(ClientSession::resume(&response.player));
                Err(err)
            }
        }
    }

    /// Prestige, then rebaseline from a fresh login
    pub async fn prestige<S: PlayerStore, C: Clock>(
        &mut self,
        service: &GameService<S, C>,
    ) -> GameResult<u32> {
        self.autosave(service).await?;
        self.session_mut()?.invalidate();

        let result = service.prestige(&self.username).await;

        let response = service.login(&self.username).await?;
        self.session = Some(ClientSession::resume(&response.player));

        result.map(|receipt| receipt.gained)
    }

    fn session_mut(&mut self) -> GameResult<&mut ClientSession> {
        self.session
            .as_mut()
            .ok_or_else(|| GameError::InvalidState("client is not logged in".into()))
    }
}
