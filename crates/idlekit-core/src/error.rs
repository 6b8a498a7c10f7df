//! Error taxonomy for the idlekit engine

use thiserror::Error;

use crate::UpgradeId;

/// Engine errors, reported synchronously to the immediate caller
#[derive(Error, Debug)]
pub enum GameError {
    // Input errors - caller mistakes, not retried
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Entity errors
    #[error("Player not found: {0}")]
    PlayerNotFound(String),

    #[error("Unknown upgrade: {0}")]
    UpgradeNotFound(UpgradeId),

    // Business-rule rejections - checked before mutation, never partial
    #[error("Insufficient funds: have {have}, need {need}")]
    InsufficientFunds { have: f64, need: f64 },

    #[error("Upgrade already owned: {0}")]
    AlreadyOwned(UpgradeId),

    // State errors
    #[error("Invalid state: {0}")]
    InvalidState(String),

    // Session errors
    #[error("Session is stale: rebaseline from the ledger before simulating")]
    StaleSession,

    // Persistence errors - collaborator unavailable, no retry in the core
    #[error("Persistence failure: {0}")]
    Persistence(String),
}

/// Result type for idlekit operations
pub type GameResult<T> = Result<T, GameError>;
