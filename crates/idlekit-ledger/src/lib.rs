//! idlekit Ledger - Accrual math and the progression state machine
//!
//! This crate implements the authoritative progression rules:
//! - Accrual calculation (owned upgrades × prestige multiplier)
//! - Offline credit and checkpoint advance
//! - Checkpoint saves of client-simulated currency
//! - Upgrade purchase
//! - Prestige reset
//!
//! The ledger is a pure state machine over `PlayerState`; durability and
//! per-player serialization live one layer up, in the runtime crate.

pub mod accrual;
pub mod ledger;

pub use accrual::*;
pub use ledger::*;
