//! idlekit Test Harness - End-to-end protocol validation
//!
//! This crate provides:
//! - A simulated presentation client that follows the reconciliation rules
//! - Scripted end-to-end session scenarios
//! - A seeded random soak that hammers one player with the full operation
//!   mix while checking the engine invariants

pub mod simulator;
pub mod soak;

pub use simulator::*;
pub use soak::*;
